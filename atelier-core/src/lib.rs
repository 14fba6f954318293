//! List-view machinery for the Atelier admin console.
//!
//! Every admin page (accounts, contests, submissions, campaigns, ...) is the
//! same shape: fetch records, filter and paginate them, and dispatch row
//! actions back to the API. This crate holds that shape once:
//!
//! - [`query`] filters and paginates any [`query::Listable`] record
//! - [`workflow`] declares each entity's legal status transitions
//! - [`transition`] executes a transition with an in-flight guard
//! - [`list_view`] ties them into a controller a page drives
//!
//! Transport lives in `atelier-console`; nothing here performs I/O.
#![allow(missing_docs)]

pub mod api;
pub mod context;
pub mod error;
pub mod feedback;
pub mod list_view;
pub mod query;
pub mod stats;
pub mod transition;
pub mod validation;
pub mod workflow;

pub use error::{GENERIC_FAILURE, RequestError, SubmitError, TransitionError};
pub use feedback::{Notice, NoticeLevel};
pub use list_view::{
    Fetched, ListSource, ListView, ListViewController, LoadState, LoadTicket,
    Row,
};
pub use query::{
    CategoryFilter, FilterState, Listable, PageResult, StatusFilter,
};
pub use transition::{
    Reconcile, TransitionExecutor, TransitionOutcome, TransitionPort,
};
pub use validation::{Validate, ValidationErrors};
pub use workflow::{RowAction, StatusAction, StatusWorkflow};
