//! Order repository: checkout and order history.

use sqlx::PgPool;

use cortado_core::{OrderStatus, Price, UserId};

use super::RepositoryError;
use crate::models::cart::CartLine;
use crate::models::order::{Order, OrderHistory, OrderItem, OrderWithItems};

/// Repository for orders and the checkout transaction.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Convert the user's cart into an order, atomically.
    ///
    /// In one transaction: snapshot the cart lines into `orders` +
    /// `order_items`, clear the cart, and accrue loyalty points (one point
    /// per whole dollar of the total). Returns `None` when the cart is
    /// empty, in which case nothing is written.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if any statement fails; the
    /// transaction rolls back.
    pub async fn checkout(&self, user_id: UserId) -> Result<Option<OrderWithItems>, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let lines = sqlx::query_as::<_, CartLine>(
            r"
            SELECT ci.id, ci.user_id, ci.menu_item_id,
                   mi.name AS item_name, mi.price AS unit_price,
                   ci.quantity, ci.customizations, ci.created_at
            FROM cart_items ci
            JOIN menu_items mi ON mi.id = ci.menu_item_id
            WHERE ci.user_id = $1
            ORDER BY ci.created_at
            FOR UPDATE OF ci
            ",
        )
        .bind(user_id)
        .fetch_all(&mut *tx)
        .await?;

        if lines.is_empty() {
            // Dropping the transaction rolls it back
            return Ok(None);
        }

        let total: Price = lines.iter().map(CartLine::line_total).sum();

        let order = sqlx::query_as::<_, Order>(
            r"
            INSERT INTO orders (user_id, status, total)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, status, total, created_at
            ",
        )
        .bind(user_id)
        .bind(OrderStatus::Placed)
        .bind(total)
        .fetch_one(&mut *tx)
        .await?;

        let mut items = Vec::with_capacity(lines.len());
        for line in &lines {
            let item = sqlx::query_as::<_, OrderItem>(
                r"
                INSERT INTO order_items (order_id, menu_item_id, item_name, quantity, unit_price)
                VALUES ($1, $2, $3, $4, $5)
                RETURNING id, order_id, menu_item_id, item_name, quantity, unit_price
                ",
            )
            .bind(order.id)
            .bind(line.menu_item_id)
            .bind(&line.item_name)
            .bind(line.quantity)
            .bind(line.unit_price)
            .fetch_one(&mut *tx)
            .await?;
            items.push(item);
        }

        sqlx::query("DELETE FROM cart_items WHERE user_id = $1")
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        let earned = total.whole_dollars();
        sqlx::query(
            r"
            INSERT INTO rewards (user_id, points, lifetime_points)
            VALUES ($1, $2, $2)
            ON CONFLICT (user_id) DO UPDATE
            SET points = rewards.points + $2,
                lifetime_points = rewards.lifetime_points + $2,
                updated_at = now()
            ",
        )
        .bind(user_id)
        .bind(earned)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(Some(OrderWithItems { order, items }))
    }

    /// Order history for a user, newest first, with line items.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn list_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<OrderWithItems>, RepositoryError> {
        let orders = sqlx::query_as::<_, Order>(
            r"
            SELECT id, user_id, status, total, created_at
            FROM orders
            WHERE user_id = $1
            ORDER BY created_at DESC
            ",
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        let mut result = Vec::with_capacity(orders.len());
        for order in orders {
            let items = sqlx::query_as::<_, OrderItem>(
                r"
                SELECT id, order_id, menu_item_id, item_name, quantity, unit_price
                FROM order_items
                WHERE order_id = $1
                ORDER BY id
                ",
            )
            .bind(order.id)
            .fetch_all(self.pool)
            .await?;
            result.push(OrderWithItems { order, items });
        }

        Ok(result)
    }

    /// Aggregate history signals used by the barista's discount policy:
    /// order count, most recent order time, most-purchased item name.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn history(&self, user_id: UserId) -> Result<OrderHistory, RepositoryError> {
        let row: (i64, Option<chrono::DateTime<chrono::Utc>>) = sqlx::query_as(
            "SELECT COUNT(*), MAX(created_at) FROM orders WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_one(self.pool)
        .await?;

        let favorite_item: Option<String> = sqlx::query_scalar(
            r"
            SELECT oi.item_name
            FROM order_items oi
            JOIN orders o ON o.id = oi.order_id
            WHERE o.user_id = $1
            GROUP BY oi.item_name
            ORDER BY SUM(oi.quantity) DESC, oi.item_name
            LIMIT 1
            ",
        )
        .bind(user_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(OrderHistory {
            total_orders: row.0,
            last_order_at: row.1,
            favorite_item,
        })
    }
}
