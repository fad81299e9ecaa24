// Phase order is part of the model: volcanism, atmosphere, surface,
// biosphere, diffusion, cover. Cover classification runs last, so every
// phase within a tick sees the previous tick's covers.

mod atmosphere;
mod biosphere;
mod cover;
mod diffusion;
mod surface;
mod volcanism;

pub use atmosphere::AtmosphereSystem;
pub use biosphere::BiosphereSystem;
pub use cover::CoverSystem;
pub use diffusion::DiffusionSystem;
pub use surface::SurfaceSystem;
pub use volcanism::VolcanismSystem;
