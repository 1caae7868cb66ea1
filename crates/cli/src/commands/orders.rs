//! Inspect recent orders from the terminal.

use tracing::info;

use tio_pelotte_core::OrderStatus;

/// List recent orders, newest first, optionally filtered by status.
///
/// # Errors
///
/// Returns an error if environment variables are missing, the status
/// filter is invalid, or the backend call fails.
pub async fn recent(estado: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let estado = estado.map(str::parse::<OrderStatus>).transpose()?;

    let client = super::client_from_env()?;
    let orders = client.list_orders(estado).await?;

    if orders.is_empty() {
        info!("No orders found");
        return Ok(());
    }

    for order in &orders {
        info!(
            id = %order.id,
            estado = %order.estado,
            total = %order.total,
            phone = %order.phone,
            created_at = %order.created_at,
            "{}",
            order.name
        );
    }

    info!("{} orders listed", orders.len());

    Ok(())
}
