use super::{
    repository::{self, OrderActor, OrderStatus},
    service::{self, Transition},
};
use crate::modules::restaurant;
use crate::types::{Context, JobFn, SchedulableJob};
use std::str::FromStr;
use std::sync::Arc;

const AUTO_CANCEL_REASON: &str = "Restaurant did not respond in time";

async fn cancel_stale_orders_job(ctx: Arc<Context>) -> Result<(), apalis::prelude::Error> {
    let cutoff = chrono::Utc::now().naive_utc() - ctx.orders.acceptance_timeout;

    let orders = match repository::find_many_pending_before(&ctx.db_conn.pool, cutoff).await {
        Ok(orders) => orders,
        Err(_) => return Ok(()),
    };

    if orders.is_empty() {
        return Ok(());
    }

    tracing::info!("Cancelling {} stale pending order(s)", orders.len());

    for order in orders {
        let order_id = order.id.clone();
        let restaurant =
            match restaurant::repository::find_by_id(&ctx.db_conn.pool, order.restaurant_id.clone())
                .await
            {
                Ok(Some(restaurant)) => restaurant,
                Ok(None) => {
                    tracing::warn!("Order {} points at a missing restaurant", order_id);
                    continue;
                }
                Err(_) => continue,
            };

        // The restaurant may confirm between the scan and the update; that
        // surfaces as a conflict and the order is left alone.
        if let Err(err) = service::transition(
            &ctx,
            order,
            &restaurant,
            Transition {
                actor: OrderActor::System,
                actor_id: None,
                to: OrderStatus::Cancelled,
                cancellation_reason: Some(AUTO_CANCEL_REASON.to_string()),
            },
        )
        .await
        {
            tracing::warn!("Could not auto-cancel order {}: {:?}", order_id, err);
        }
    }

    Ok(())
}

fn setup_cancel_stale_orders_job(ctx: Arc<Context>) -> JobFn {
    Arc::new(move || {
        let ctx = ctx.clone();
        Box::pin(async move { cancel_stale_orders_job(ctx).await })
    })
}

pub fn list(ctx: Arc<Context>) -> Vec<SchedulableJob> {
    vec![SchedulableJob {
        name: "flashbites::order::cancel_stale_orders",
        schedule: apalis::cron::Schedule::from_str("0 * * * * *")
            .expect("Couldn't create schedule!"),
        job: setup_cancel_stale_orders_job(ctx),
    }]
}
