//! View models of the console pages
//!
//! Each page owns its list controller and dialogs and reads rows from the
//! [`Store`](crate::store::Store). Nothing here renders; front ends match on
//! [`TableView`] and the dialog enums.

pub mod dashboard;
pub mod debounce;
pub mod list;
pub mod payments_table;
pub mod payouts;
pub mod users_table;

pub use dashboard::DashboardSummary;
pub use debounce::{Debounce, DEFAULT_QUIET_PERIOD};
pub use list::{ListController, ListRequest, Pagination, TableView};
pub use payments_table::PaymentsTable;
pub use payouts::{PayoutDialog, PayoutsPanel};
pub use users_table::{UserFilters, UsersTable, USERS_PAGE_SIZE};
