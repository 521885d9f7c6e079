pub mod propagation;
pub mod selection;
