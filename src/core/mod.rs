mod category;
mod leaf;
mod node;
mod report;
mod section;

pub use category::Category;
pub use leaf::Leaf;
pub use node::{AddOutcome, Node, NodeKind, accepts};
pub use report::Report;
pub use section::{Section, SectionData};
