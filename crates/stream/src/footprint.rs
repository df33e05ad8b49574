use terrastream_terrain::ChunkCoord;

/// Offsets of the streamed neighborhood, in concatenation order.
///
/// Seven cells, not a full 3x3: the `(+1, -1)` and `(-1, +1)` corners are
/// left out.
pub const FOOTPRINT: [(i32, i32); 7] = [
    (0, 0),
    (-1, 0),
    (0, -1),
    (-1, -1),
    (1, 0),
    (0, 1),
    (1, 1),
];

/// The neighborhood around `center`, in concatenation order.
pub fn footprint(center: ChunkCoord) -> [ChunkCoord; 7] {
    FOOTPRINT.map(|(dx, dz)| center.offset(dx, dz))
}
