use anyhow::anyhow;
use md5::{Digest, Md5};

use super::crypto;

pub const KEY_LENGTH: usize = 32;
pub const IV_LENGTH: usize = 16;

/// CryptoJS/OpenSSL passphrase decryption where the envelope carries its own IV.
///
/// The IV produced by [`derive_key_and_iv`] is dropped: only the key half of
/// the derived material is used.
pub fn decrypt_aes_with_iv(
    password: &[u8],
    salt: &[u8],
    iv: &[u8],
    ct: &[u8],
) -> anyhow::Result<String> {
    let (key, _) = derive_key_and_iv(password, salt);

    let pt = crypto::decrypt_aes(&key, iv, ct)?;

    String::from_utf8(pt).map_err(|e| anyhow!(e))
}

pub fn encrypt_aes_with_iv(
    password: &[u8],
    salt: &[u8],
    iv: &[u8],
    pt: &[u8],
) -> anyhow::Result<Vec<u8>> {
    let (key, _) = derive_key_and_iv(password, salt);

    crypto::encrypt_aes(&key, iv, pt)
}

/// EVP_BytesToKey with MD5 and a single iteration.
pub fn derive_key_and_iv(password: &[u8], salt: &[u8]) -> ([u8; KEY_LENGTH], [u8; IV_LENGTH]) {
    const HASH_SIZE: usize = KEY_LENGTH + IV_LENGTH;
    const DIGIT_SIZE: usize = 16;

    let mut hash: [u8; HASH_SIZE] = [0; HASH_SIZE];
    let mut calculated = 0;

    while calculated < HASH_SIZE {
        let mut hasher = Md5::new();
        if calculated > 0 {
            hasher.update(&hash[(calculated - DIGIT_SIZE)..calculated])
        }

        let out = hasher.chain_update(password).chain_update(salt).finalize();

        hash[calculated..(calculated + DIGIT_SIZE)].copy_from_slice(out.as_slice());

        calculated += DIGIT_SIZE;
    }

    let mut key = [0; KEY_LENGTH];
    let mut iv = [0; IV_LENGTH];
    key.copy_from_slice(&hash[..KEY_LENGTH]);
    iv.copy_from_slice(&hash[KEY_LENGTH..]);

    (key, iv)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_derive_key_and_iv() {
        const PASSWORD: &[u8] = b"idlix";
        const SALT: &[u8] = &[0xa0, 0xa1, 0xa2, 0xa3, 0xa4, 0xa5, 0xa6, 0xa7];
        const RESULT_KEY: [u8; KEY_LENGTH] = [
            27, 52, 250, 188, 173, 164, 206, 149, 100, 23, 213, 50, 85, 14, 171, 246, 97, 96, 22,
            185, 127, 18, 68, 128, 88, 42, 125, 126, 151, 45, 161, 77,
        ];
        const RESULT_IV: [u8; IV_LENGTH] = [
            13, 155, 44, 198, 248, 227, 209, 168, 122, 50, 224, 141, 198, 153, 116, 197,
        ];

        let (key, iv) = derive_key_and_iv(PASSWORD, SALT);

        assert_eq!(RESULT_KEY, key);
        assert_eq!(RESULT_IV, iv);
    }

    #[test]
    fn should_derive_same_key_every_time() {
        let salt = hex::decode("3f6a1c9e0b5d7284").unwrap();

        let first = derive_key_and_iv(b"idlix", &salt);
        let second = derive_key_and_iv(b"idlix", &salt);

        assert_eq!(first, second);
        assert_eq!(
            "3c2d10b2772e903bcff5b7849ccfbd8f02ea67b7d663940ae27392bc8c412488",
            hex::encode(first.0)
        );
        assert_eq!("349096c780216595a7b97dd142a66864", hex::encode(first.1));
        assert_ne!(first.0, derive_key_and_iv(b"idlix", b"othersalt").0);
    }

    #[test]
    fn should_decrypt_with_explicit_iv() {
        let salt = hex::decode("3f6a1c9e0b5d7284").unwrap();
        let iv = hex::decode("00112233445566778899aabbccddeeff").unwrap();
        let ct = crypto::decrypt_base64_aes(
            &derive_key_and_iv(b"idlix", &salt).0,
            &iv,
            b"QWxsbxBC9zfxbboR6ZW6uXSBkiSEkhGYdXd1AsW7VGLUIkR4ImjU0itSR/kM8Gfr",
        )
        .unwrap();

        assert_eq!(
            r#"{"embed_url":"https://cdn.example/stream.mp4"}"#,
            String::from_utf8(ct).unwrap()
        );
    }

    #[test]
    fn should_not_use_derived_iv() {
        let salt = b"saltsalt";
        let (_, derived_iv) = derive_key_and_iv(b"idlix", salt);
        let explicit_iv = [7u8; IV_LENGTH];
        assert_ne!(derived_iv, explicit_iv);

        let ct = encrypt_aes_with_iv(b"idlix", salt, &explicit_iv, b"payload").unwrap();

        let res = decrypt_aes_with_iv(b"idlix", salt, &explicit_iv, &ct).unwrap();
        assert_eq!("payload", res);

        let (key, _) = derive_key_and_iv(b"idlix", salt);
        assert_eq!(
            ct,
            crypto::encrypt_aes(&key, &explicit_iv, b"payload").unwrap()
        );
    }
}
