extern crate alloc;
extern crate std;

use alloc::vec::Vec;

use proptest::prelude::*;
use traits::BlockFlags;

use super::Simon128;
use crate::model;

fn arb_key() -> impl Strategy<Value = Vec<u8>> {
  prop_oneof![
    proptest::collection::vec(any::<u8>(), 16),
    proptest::collection::vec(any::<u8>(), 24),
    proptest::collection::vec(any::<u8>(), 32),
  ]
}

fn arb_flags() -> impl Strategy<Value = BlockFlags> {
  (any::<bool>(), any::<bool>(), any::<bool>()).prop_map(|(parallel, pre_xor, reverse)| {
    let mut flags = BlockFlags::NONE;
    if parallel {
      flags |= BlockFlags::ALLOW_PARALLEL;
    }
    if pre_xor {
      flags |= BlockFlags::XOR_INPUT;
    }
    if reverse {
      flags |= BlockFlags::REVERSE_DIRECTION;
    }
    flags
  })
}

proptest! {
  #[test]
  fn roundtrip(key in arb_key(), data in proptest::collection::vec(any::<u8>(), 0..=512)) {
    let cipher = Simon128::new(&key).unwrap();
    let len = data.len() - data.len() % 16;

    let mut ciphertext = alloc::vec![0u8; data.len()];
    let remaining = cipher.encrypt_blocks(&data, None, &mut ciphertext, BlockFlags::ALLOW_PARALLEL);
    prop_assert_eq!(remaining, data.len() - len);

    let mut recovered = alloc::vec![0u8; len];
    cipher.decrypt_blocks(&ciphertext[..len], None, &mut recovered, BlockFlags::ALLOW_PARALLEL);
    prop_assert_eq!(&recovered[..], &data[..len]);
  }

  #[test]
  fn driver_matches_model(
    key in arb_key(),
    data in proptest::collection::vec(any::<u8>(), 0..=512),
    stream in proptest::collection::vec(any::<u8>(), 512),
    flags in arb_flags(),
    with_xor in any::<bool>(),
    encrypt in any::<bool>(),
  ) {
    let cipher = Simon128::new(&key).unwrap();
    let xor = with_xor.then(|| &stream[..data.len()]);

    let mut got = alloc::vec![0u8; data.len()];
    let mut want = alloc::vec![0u8; data.len()];
    if encrypt {
      let remaining = cipher.encrypt_blocks(&data, xor, &mut got, flags);
      prop_assert_eq!(remaining, data.len() % 16);
      model::process_blocks(|b| cipher.reference_encrypt_block(b), &data, xor, &mut want, flags);
    } else {
      let remaining = cipher.decrypt_blocks(&data, xor, &mut got, flags);
      prop_assert_eq!(remaining, data.len() % 16);
      model::process_blocks(|b| cipher.reference_decrypt_block(b), &data, xor, &mut want, flags);
    }
    prop_assert_eq!(got, want);
  }

  #[test]
  fn counter_matches_model(
    key in arb_key(),
    prefix in any::<[u8; 8]>(),
    base in any::<u64>(),
    blocks in 0usize..=16,
    with_xor in any::<bool>(),
    stream in proptest::collection::vec(any::<u8>(), 16 * 16),
  ) {
    let cipher = Simon128::new(&key).unwrap();
    let len = blocks * 16;
    let xor = with_xor.then(|| &stream[..len]);

    let mut counter = [0u8; 16];
    counter[..8].copy_from_slice(&prefix);
    counter[8..].copy_from_slice(&base.to_be_bytes());
    let mut model_counter = counter;

    let mut got = alloc::vec![0u8; len];
    let mut want = alloc::vec![0u8; len];
    cipher.encrypt_counter_blocks(&mut counter, xor, &mut got);
    model::process_counter_blocks(
      |b| cipher.reference_encrypt_block(b),
      &mut model_counter,
      xor,
      &mut want,
    );
    prop_assert_eq!(got, want);
    prop_assert_eq!(counter, model_counter);
  }
}
