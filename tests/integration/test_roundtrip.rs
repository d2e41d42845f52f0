//! Library-level round trips across the header, matrix, image, batch,
//! transpose and verification modules.

use cobsimg_lib::batch::{reassemble, split_and_encode};
use cobsimg_lib::header::split_classic_index;
use cobsimg_lib::image::{CodecOptions, decode, encode};
use cobsimg_lib::matrix::pack;
use cobsimg_lib::metadata::IndexMetadata;
use cobsimg_lib::transpose::{transpose_and_pack, unpack_transposed};
use cobsimg_lib::verify::reconstruct;
use cobsimg_lib::CobsImgError;
use proptest::prelude::*;
use rstest::rstest;

use crate::helpers::*;

#[rstest]
#[case(8, 16, 0)]
#[case(80, 2, 32)]
fn test_example_end_to_end(#[case] width: usize, #[case] rows: usize, #[case] padding: usize) {
    let index = build_index(&EXAMPLE_PAYLOAD);
    let split = split_classic_index(&index).unwrap();
    assert_eq!(split.header, example_header().as_slice());
    assert_eq!(split.payload, EXAMPLE_PAYLOAD.as_slice());

    let packed = pack(split.payload, width).unwrap();
    assert_eq!(packed.matrix.rows(), rows);
    assert_eq!(packed.padding_bits(), padding);

    let options = CodecOptions::default();
    let decoded = decode(&encode(&packed.matrix, &options).unwrap(), &options).unwrap();
    let metadata = IndexMetadata::new(packed.original_bit_count as u64);
    let rebuilt = reconstruct(split.header, &decoded, &metadata, "memory").unwrap();
    assert_eq!(rebuilt, index);
}

#[test]
fn test_width_ten_is_unaligned() {
    let err = pack(&EXAMPLE_PAYLOAD, 10).unwrap_err();
    assert!(matches!(err, CobsImgError::UnalignedWidth { width: 10 }));
}

#[test]
fn test_batches_and_transpose_agree_with_full_image() {
    let payload = sparse_payload(2048, 21);
    let matrix = pack(&payload, 128).unwrap().matrix;
    let options = CodecOptions::default();

    let parts = split_and_encode(&matrix, 9, &options)
        .unwrap()
        .map(|png| decode(&png.unwrap(), &options).unwrap())
        .collect::<Vec<_>>();
    assert_eq!(reassemble(&parts).unwrap(), matrix);

    let transposed = transpose_and_pack(&matrix);
    assert_eq!(unpack_transposed(&transposed, 128, matrix.rows()).unwrap(), matrix);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_index_round_trip(
        payload in prop::collection::vec(any::<u8>(), 1..512),
        width_bytes in 1usize..32,
    ) {
        let index = build_index(&payload);
        let split = split_classic_index(&index).unwrap();
        let packed = pack(split.payload, width_bytes * 8).unwrap();
        prop_assert_eq!(
            packed.matrix.rows() * width_bytes * 8 - payload.len() * 8,
            packed.padding_bits()
        );

        let options = CodecOptions::default();
        let decoded = decode(&encode(&packed.matrix, &options).unwrap(), &options).unwrap();
        let metadata = IndexMetadata::new(packed.original_bit_count as u64);
        let rebuilt = reconstruct(split.header, &decoded, &metadata, "memory").unwrap();
        prop_assert_eq!(rebuilt, index);
    }
}
