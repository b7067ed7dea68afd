//! Role-based access control for bot commands.
//!
//! - [`Role`] - closed, ordered set of administrator roles
//! - [`AccessService`] - decides whether a user may run a command
//! - [`AccessGate`] - enforces that decision in front of command handlers
//! - [`build_sink`] - records rejected invocations
//!
//! ## Usage
//!
//! ```rust,ignore
//! teloxide::filter_command::<Command, _>()
//!     .branch(case![Command::Id].endpoint(id::id_command))
//!     .branch(
//!         case![Command::Start]
//!             .chain(gate::require_role(Role::Manager))
//!             .endpoint(start::start_handler),
//!     )
//! ```

mod audit;
pub mod gate;
mod role;
mod service;

pub use audit::{build_sink, AuditRecord};
pub use gate::{AccessGate, Authorized};
pub use role::{Role, UnknownRole};
pub use service::AccessService;
