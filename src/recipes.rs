pub mod banner;
pub mod earth;
pub mod layers;
pub mod silhouette;
pub mod translucent;
