mod fit_plane;

pub use fit_plane::{find_minimizing_plane, FitPlane};
