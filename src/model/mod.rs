pub mod order;
pub mod queues;
pub mod state;
