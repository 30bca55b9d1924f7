//! Main module for treecut library functionality

pub mod address;
pub mod config;
pub mod dom;
pub mod error;
pub mod extract;
pub mod paging;
pub mod progressive;
pub mod snapshot;
pub mod testing;
pub mod traversal;
pub mod treeviz;

pub use address::{address_of, compare, compare_optional, first_address, last_address, resolve, Address};
pub use self::config::{CutConfig, ListConfig, Loader, PagingConfig};
pub use dom::{Document, Fragment, NodeId, TreeRead, TreeWrite};
pub use error::{AddressParseError, Bound, CutError};
pub use extract::{extract, extract_into, ExtractOptions};
pub use paging::{paginate, Page, PageBudget, Paginator};
pub use progressive::{clone_progressive, Cursor, ResumeFrom};
pub use snapshot::TreeSnapshot;
pub use traversal::{document_order, step, DocumentOrder};
