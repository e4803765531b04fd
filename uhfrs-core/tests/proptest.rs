//! Property-based tests using proptest

use proptest::prelude::*;
use uhfrs_core::{checksum, CommandEncoder, DecodedMessage, FrameReassembler};

/// A stream of frames, some with a corrupted checksum
fn frame_stream() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(
        (
            any::<u8>(),
            prop::collection::vec(any::<u8>(), 0..32),
            any::<bool>(),
        ),
        0..12,
    )
    .prop_map(|frames| {
        let encoder = CommandEncoder::new(0x01);
        let mut stream = Vec::new();
        for (command, payload, corrupt) in frames {
            let mut bytes = encoder.build_with_payload(command, &payload).to_vec();
            if corrupt {
                let last = bytes.len() - 1;
                bytes[last] = bytes[last].wrapping_add(1);
            }
            stream.extend_from_slice(&bytes);
        }
        stream
    })
}

/// Sorted cut points inside `0..=len`
fn split(stream: &[u8], cuts: &[usize]) -> Vec<Vec<u8>> {
    let mut points: Vec<usize> = cuts
        .iter()
        .map(|c| if stream.is_empty() { 0 } else { c % (stream.len() + 1) })
        .collect();
    points.sort_unstable();

    let mut chunks = Vec::new();
    let mut start = 0;
    for point in points {
        chunks.push(stream[start..point].to_vec());
        start = point;
    }
    chunks.push(stream[start..].to_vec());
    chunks
}

proptest! {
    #[test]
    fn prop_checksum_closes_frame(bytes in prop::collection::vec(any::<u8>(), 0..512)) {
        let mut framed = bytes.clone();
        framed.push(checksum::calculate(&bytes));

        prop_assert!(checksum::verify(&framed));
    }

    #[test]
    fn prop_encoded_frame_is_valid(
        address in any::<u8>(),
        command in any::<u8>(),
        payload in prop::collection::vec(any::<u8>(), 0..250)
    ) {
        let bytes = CommandEncoder::new(address).build_with_payload(command, &payload);

        prop_assert_eq!(bytes[0], 0xA0);
        prop_assert_eq!(bytes[1] as usize, payload.len() + 3);
        prop_assert_eq!(bytes.len(), payload.len() + 5);
        prop_assert!(checksum::verify(&bytes));
    }

    #[test]
    fn prop_chunk_invariance(
        stream in frame_stream(),
        cuts in prop::collection::vec(any::<usize>(), 0..16)
    ) {
        let whole = FrameReassembler::new().feed(&stream);

        let mut reassembler = FrameReassembler::new();
        let mut pieces: Vec<DecodedMessage> = Vec::new();
        for chunk in split(&stream, &cuts) {
            pieces.extend(reassembler.feed(&chunk));
        }

        prop_assert_eq!(pieces, whole);
        prop_assert!(reassembler.pending().is_empty());
    }

    #[test]
    fn prop_byte_at_a_time(stream in frame_stream()) {
        let whole = FrameReassembler::new().feed(&stream);

        let mut reassembler = FrameReassembler::new();
        let mut pieces = Vec::new();
        for byte in &stream {
            pieces.extend(reassembler.feed(std::slice::from_ref(byte)));
        }

        prop_assert_eq!(pieces, whole);
    }

    #[test]
    fn prop_feed_never_panics(
        data in prop::collection::vec(any::<u8>(), 0..1024),
        cuts in prop::collection::vec(any::<usize>(), 0..8)
    ) {
        let mut reassembler = FrameReassembler::new();
        for chunk in split(&data, &cuts) {
            let _ = reassembler.feed(&chunk);
        }
        prop_assert!(reassembler.pending().len() <= uhfrs_core::MAX_FRAME_SIZE);
    }
}
