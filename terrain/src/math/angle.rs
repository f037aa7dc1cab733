/// Converts degrees to radians after wrapping into `[0, 360)`.
pub fn deg_to_rad(deg: f64) -> f64 {
    deg.rem_euclid(360.0).to_radians()
}

pub fn rad_to_deg(rad: f64) -> f64 {
    rad.to_degrees()
}
