pub mod agent;
pub mod funnel;
pub mod rates;

pub use agent::Agent;
pub use funnel::Funnel;
pub use rates::RateModel;
