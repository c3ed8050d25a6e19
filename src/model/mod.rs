pub use toroid_core::{FieldSummary, FixedStepClock, SimError, Simulation, TickOutcome};
pub mod config {
    pub use toroid_core::config::*;
}
pub mod indexer {
    pub use toroid_core::indexer::*;
}
pub mod kernels {
    pub use toroid_core::kernels::*;
}
pub mod dispatch {
    pub use toroid_core::dispatch::*;
}
pub mod drivers {
    pub use toroid_core::drivers::*;
}
pub mod noise {
    pub use toroid_core::noise::*;
}
pub mod injector {
    pub use toroid_core::injector::*;
}
pub mod metrics {
    pub use toroid_core::metrics::*;
}
pub mod summary {
    pub use toroid_core::summary::*;
}

pub mod state {
    pub use toroid_core::buffer::BufferPair;
    pub use toroid_core::state::*;
    pub use toroid_data::*;
}
