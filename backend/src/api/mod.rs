pub mod daily_data;
pub mod sites;
pub mod streams;
pub mod surveys;

pub use daily_data::*;
pub use sites::*;
pub use streams::*;
pub use surveys::*;
