//! The tree model: branches, leaves, paths and the values they project to.
//!
//! # Example
//!
//! ```
//! use magictree::tree::{Branch, TreeNode};
//! use serde_json::json;
//!
//! let mut root = Branch::new();
//! root.get("alfa")?.get("beta")?.set("gamma", "foo");
//!
//! assert!(root.has(["alfa", "beta", "gamma"]));
//! assert!(!root.has("alfa.beta.epsilon"));
//! assert_eq!(root.to_json(), json!({"alfa": {"beta": {"gamma": "foo"}}}));
//! # Ok::<(), magictree::TreeError>(())
//! ```

pub mod branch;
pub mod error;
pub mod leaf;
pub mod node;
pub mod path;
pub mod scalar;
pub mod value;

pub use branch::{Branch, Read};
pub use error::{TreeError, TreeResult};
pub use leaf::Leaf;
pub use node::{Node, TreeNode};
pub use path::{KeyPath, SEPARATOR};
pub use scalar::{Number, Scalar};
pub use value::Value;
