pub mod blur;
pub mod composite;
pub mod gradient;
pub mod mask;
pub mod noise;
pub mod surface;
