//! End-to-end spend flow: derive an identity, build a two-input
//! transaction, sign each input against its sighash message, assemble the
//! unlocking scripts, and serialize the final bytes.

use num_bigint::BigInt;
use rand::rngs::StdRng;
use rand::SeedableRng;

use wallet_core::ecdsa::{sign_with_rng, verify};
use wallet_core::keys::Identity;
use wallet_core::script::Script;
use wallet_core::transaction::{Tx, TxIn, TxOut};
use wallet_core::Network;

#[test]
fn craft_signed_spend_transaction() {
    let mut rng = StdRng::seed_from_u64(20140903);

    let wallet = Identity::from_secret_key(BigInt::from(1231), Network::Testnet);
    assert_eq!(wallet.address, "mxDkyxWMAFy7vhhBmF1epT7rvrNj43PNYx");
    let recipient = Identity::from_secret_key(BigInt::from(99999), Network::Testnet);

    // spend outputs 0 and 1 of a previous transaction, both locked to our
    // wallet's public-key hash
    let prev_tx: [u8; 32] =
        hex::decode("46325085c89fb98a4b7ceee44eac9b955f09e1ddc86d8dad3dfdcba46b4d36b2")
            .unwrap()
            .try_into()
            .unwrap();
    let wallet_lock = Script::p2pkh(&wallet.pkb_hash);

    let mut tx = Tx {
        version: 1,
        inputs: vec![
            TxIn::new(Network::Testnet, prev_tx, 0, wallet_lock.clone()),
            TxIn::new(Network::Testnet, prev_tx, 1, wallet_lock),
        ],
        outputs: vec![
            TxOut::new(50_000, Script::p2pkh(&recipient.pkb_hash)),
            // change, minus an implied fee
            TxOut::new(47_500, Script::p2pkh(&wallet.pkb_hash)),
        ],
        locktime: 0,
    };

    // each input is signed over its own substituted message
    let pubkey_bytes = wallet.public_key.encode(true);
    for i in 0..tx.inputs.len() {
        let message = tx.sighash(i).unwrap();
        let sig = sign_with_rng(&mut rng, &wallet.secret_key, &message).unwrap();
        assert!(verify(&wallet.public_key, &message, &sig));

        let mut sig_bytes_and_type = sig.encode();
        sig_bytes_and_type.push(0x01); // SIGHASH_ALL
        tx.inputs[i].script_sig = Some(Script::p2pkh_unlock(
            sig_bytes_and_type,
            pubkey_bytes.clone(),
        ));
    }

    // the signed transaction serializes and gets a stable id
    let encoded = tx.encode(None).unwrap();
    assert!(encoded.len() > 300);
    let id = tx.id().unwrap();
    assert_eq!(id.len(), 64);
    assert_eq!(tx.id().unwrap(), id);

    // the two signatures are independent: distinct messages, distinct r
    let msg0 = tx.sighash(0).unwrap();
    let msg1 = tx.sighash(1).unwrap();
    assert_ne!(msg0, msg1);

    // a tampered output invalidates every input's old signature message
    let mut tampered = tx.clone();
    tampered.outputs[0].amount += 1;
    assert_ne!(tampered.sighash(0).unwrap(), msg0);
    assert_ne!(tampered.sighash(1).unwrap(), msg1);
}
