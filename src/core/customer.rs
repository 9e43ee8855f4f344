use crate::db::{customers, transactions};
use crate::errors::{AppError, AppResult};
use crate::models::customer::Customer;
use crate::models::transaction::{Balance, TransactionRow};
use rusqlite::Connection;

/// A customer with their history and balance.
#[derive(Debug, Clone)]
pub struct CustomerProfile {
    pub customer: Customer,
    pub history: Vec<TransactionRow>,
    pub balance: Balance,
}

pub struct CustomerLogic;

impl CustomerLogic {
    /// Exact name first; otherwise a fuzzy search that yields exactly one match.
    pub fn resolve(conn: &Connection, name: &str) -> AppResult<Customer> {
        let id = match customers::get_id_by_name(conn, name.trim())? {
            Some(id) => id,
            None => {
                let matches = customers::fuzzy_search(conn, name, 2)?;
                match matches.as_slice() {
                    [(id, _)] => *id,
                    _ => return Err(AppError::CustomerNotFound(name.to_string())),
                }
            }
        };

        customers::get_details(conn, id)?.ok_or_else(|| AppError::CustomerNotFound(name.to_string()))
    }

    pub fn profile(conn: &Connection, name: &str) -> AppResult<CustomerProfile> {
        let customer = Self::resolve(conn, name)?;
        let history = transactions::list_by_customer(conn, &customer.name)?;
        let balance = Balance::from_rows(&history);

        Ok(CustomerProfile {
            customer,
            history,
            balance,
        })
    }
}
