//! Catalogue management behind the admin login: tables, dishes, and edits to
//! single bookings. Every call goes through the dashboard's session, so a 401
//! here logs the dashboard out like it does for the bookings list.

use std::fmt::Write;

use super::AdminDashboard;
use crate::error::ApiResult;
use crate::models::{Booking, Dish, Table};
use crate::services::ApiClient;

impl AdminDashboard {
    pub async fn tables(&mut self, api: &ApiClient) -> ApiResult<Vec<Table>> {
        self.authorized(|credential| async move { api.list_tables(&credential).await })
            .await
    }

    pub async fn table(&mut self, api: &ApiClient, id: i32) -> ApiResult<Table> {
        self.authorized(|credential| async move { api.get_table(id, &credential).await })
            .await
    }

    pub async fn create_table(&mut self, api: &ApiClient, table: &Table) -> ApiResult<()> {
        self.authorized(|credential| async move { api.create_table(table, &credential).await })
            .await
    }

    pub async fn update_table(&mut self, api: &ApiClient, table: &Table) -> ApiResult<()> {
        self.authorized(|credential| async move { api.update_table(table, &credential).await })
            .await
    }

    pub async fn delete_table(&mut self, api: &ApiClient, id: i32) -> ApiResult<()> {
        self.authorized(|credential| async move { api.delete_table(id, &credential).await })
            .await
    }

    pub async fn create_dish(&mut self, api: &ApiClient, dish: &Dish) -> ApiResult<()> {
        self.authorized(|credential| async move { api.create_dish(dish, &credential).await })
            .await
    }

    pub async fn update_dish(&mut self, api: &ApiClient, dish: &Dish) -> ApiResult<()> {
        self.authorized(|credential| async move { api.update_dish(dish, &credential).await })
            .await
    }

    pub async fn delete_dish(&mut self, api: &ApiClient, id: i32) -> ApiResult<()> {
        self.authorized(|credential| async move { api.delete_dish(id, &credential).await })
            .await
    }

    pub async fn booking(&mut self, api: &ApiClient, id: i32) -> ApiResult<Booking> {
        self.authorized(|credential| async move { api.get_booking(id, &credential).await })
            .await
    }

    /// Saves an edited booking and refreshes the list on success.
    pub async fn update_booking(&mut self, api: &ApiClient, booking: &Booking) -> ApiResult<()> {
        self.authorized(|credential| async move { api.update_booking(booking, &credential).await })
            .await?;
        self.load_bookings(api).await;
        Ok(())
    }
}

pub fn render_tables(tables: &[Table]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Tables");
    let _ = writeln!(out, "  {:>5}  {:>6}  {:>8}", "ID", "Number", "Capacity");
    for table in tables {
        let _ = writeln!(out, "  {:>5}  {:>6}  {:>8}", table.id, table.table_number, table.capacity);
    }
    out
}

pub fn render_booking(booking: &Booking) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Booking {}", booking.id);
    let _ = writeln!(out, "  Date   : {}", booking.booking_date.format("%Y-%m-%d"));
    let _ = writeln!(out, "  Time   : {}", booking.start_time.format("%H:%M"));
    let _ = writeln!(out, "  Guests : {}", booking.number_of_guests);
    if let Some(customer) = &booking.customer {
        let _ = writeln!(out, "  Name   : {}", customer.name);
        let _ = writeln!(out, "  Phone  : {}", customer.phone_number);
    }
    match &booking.table {
        Some(table) => {
            let _ = writeln!(out, "  Table  : {}", table.table_number);
        }
        None => {
            let _ = writeln!(out, "  Table  : id {}", booking.table_id);
        }
    }
    out
}
