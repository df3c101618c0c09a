/*!
 * Fixed-size content chunking
 */

/// Default chunk length in characters
pub const DEFAULT_CHUNK_SIZE: usize = 2000;

/// Only this many leading chunks of a file are written to disk
pub const MAX_PERSISTED_CHUNKS: usize = 2;

/// Split `content` into consecutive segments of `chunk_size` characters.
///
/// The last segment may be shorter, empty content yields no segments and the
/// segments concatenate back to `content`. Splits happen on character
/// boundaries. A `chunk_size` of zero is treated as one.
pub fn chunk_content(content: &str, chunk_size: usize) -> Vec<&str> {
    let size = chunk_size.max(1);
    let mut chunks = Vec::new();
    let mut start = 0;
    let mut count = 0;

    for (idx, _) in content.char_indices() {
        if count == size {
            chunks.push(&content[start..idx]);
            start = idx;
            count = 0;
        }
        count += 1;
    }

    if count > 0 {
        chunks.push(&content[start..]);
    }

    chunks
}
