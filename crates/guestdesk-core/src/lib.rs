//! guestdesk-core: domain model and list-management services.
//!
//! Everything the two front-ends share lives here: typed entities with
//! closed status-code sets, the pure filter/sort/paginate engine, the
//! fetch-fenced collection store, the modal workflow state machine,
//! form validation, statistics aggregation, and CSV export.

pub mod convert;
pub mod error;
pub mod export;
pub mod forms;
pub mod model;
pub mod modal;
pub mod query;
pub mod service;
pub mod stats;
pub mod store;
pub mod validate;
pub mod view;

pub use error::CoreError;
pub use forms::{ProductForm, RoomForm, UserForm};
pub use modal::{ModalState, MutationErrorPolicy, SubmitOutcome};
pub use model::{
    Category, Order, OrderItem, OrderStatus, Product, Room, RoomCategory, User, UserRole,
    UserStatus,
};
pub use query::{DateRange, FilterSpec, ListQuery, PageSpec, SortDirection, SortSpec, StatusFilter};
pub use service::AdminService;
pub use stats::StatusBreakdown;
pub use store::{CollectionStore, FetchSeq, LoadState};
pub use view::{Listable, SortKey, VisiblePage, visible};
