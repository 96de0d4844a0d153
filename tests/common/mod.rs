pub mod builders;
pub mod mock_committer;
pub mod strategies;

#[allow(unused_imports)]
pub use builders::*;
#[allow(unused_imports)]
pub use mock_committer::*;
