mod loss_fn;
mod sae;

pub use loss_fn::LossFn;
pub use sae::Sae;
