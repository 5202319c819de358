#![no_main]

use libfuzzer_sys::fuzz_target;
use paillier::{Decrypt, Encrypt, HomomorphicAdd, KeyPair};

use std::sync::OnceLock;

static KEYPAIR: OnceLock<KeyPair> = OnceLock::new();

fuzz_target!(|input: (u32, u32, u32)| {
    let keypair = KEYPAIR.get_or_init(|| KeyPair::generate_with_size(256).unwrap());
    let (m1, m2, m3) = input;

    let c1 = keypair.encrypt(m1.into()).unwrap();
    let c2 = keypair.encrypt(m2.into()).unwrap();
    let c3 = keypair.encrypt(m3.into()).unwrap();

    let left = keypair.add(&keypair.add(&c1, &c2).unwrap(), &c3).unwrap();
    let right = keypair.add(&c1, &keypair.add(&c3, &c2).unwrap()).unwrap();
    assert_eq!(left, right);

    let expected = i64::from(m1) + i64::from(m2) + i64::from(m3);
    assert_eq!(keypair.decrypt(&left).unwrap(), expected);
});
