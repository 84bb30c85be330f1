pub mod states;
pub mod params;
pub mod engine;
pub mod forces;
pub mod polarity;
pub mod deformer;
pub mod scenario;
