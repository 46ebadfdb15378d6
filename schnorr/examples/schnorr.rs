use rand::SeedableRng;
use rand::rngs::StdRng;
use secp_schnorr::hash::hash;
use secp_schnorr::{Signature, SigningKey, VerifyingKey};

fn main() {
    let mut rng = StdRng::seed_from_u64(42);
    let sk = SigningKey::random(&mut rng);
    let vk = VerifyingKey::from(&sk);

    let sk_bytes = bincode::serialize(&sk).expect("serialize sk");
    let vk_bytes = bincode::serialize(&vk).expect("serialize vk");

    let msg = hash(&[b"hello schnorr"]);

    let sig = sk.sign(&msg).expect("sign");
    let sig_bytes = bincode::serialize(&sig).expect("serialize sig");

    let sk2: SigningKey = bincode::deserialize(&sk_bytes).expect("deserialize sk");
    let vk2: VerifyingKey = bincode::deserialize(&vk_bytes).expect("deserialize vk");
    let sig2: Signature = bincode::deserialize(&sig_bytes).expect("deserialize sig");

    let ok = vk2.verify(&msg, &sig2).expect("verify");
    assert!(ok);
    assert_eq!(sk2.sign(&msg).expect("sign"), sig);

    println!("public key: {}", vk.to_hex());
    println!("signature:  {}", sig.to_hex());
}
