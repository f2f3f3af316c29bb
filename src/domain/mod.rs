mod account;
mod expense;
mod money;
mod product;
mod report;
mod selection;
mod validation;

pub use account::*;
pub use expense::*;
pub use money::*;
pub use product::*;
pub use report::*;
pub use selection::*;
pub use validation::*;
