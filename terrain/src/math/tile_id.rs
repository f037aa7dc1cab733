/// Encodes a slippy-map tile as a single integer.
///
/// Zoom level `z` owns the id range `[(4^z - 1) / 3, (4^z+1 - 1) / 3)`
/// and tiles within it are numbered row major, so ids are unique
/// across all zoom levels up to [`MAX_ZOOM`](crate::MAX_ZOOM).
pub fn xyz_to_tile_id(x: u32, y: u32, zoom: u8) -> u64 {
    zoom_offset(zoom) + u64::from(y) * (1_u64 << zoom) + u64::from(x)
}

/// Inverse of [`xyz_to_tile_id`].
///
/// Returns `None` for ids beyond [`MAX_ZOOM`](crate::MAX_ZOOM).
pub fn tile_id_to_xyz(id: u64) -> Option<(u32, u32, u8)> {
    let zoom = (0..=crate::MAX_ZOOM).find(|&z| id < zoom_offset(z + 1))?;
    let local = id - zoom_offset(zoom);
    let side = 1_u64 << zoom;
    #[allow(clippy::cast_possible_truncation)]
    Some(((local % side) as u32, (local / side) as u32, zoom))
}

/// Number of tiles in all zoom levels below `zoom`.
fn zoom_offset(zoom: u8) -> u64 {
    ((1_u64 << (2 * u32::from(zoom))) - 1) / 3
}
