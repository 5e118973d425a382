use base64::{engine::general_purpose::STANDARD, Engine as _};

use ssh_keysmith::config::{merge, HostEntry, AZURE_DEVOPS_ALIAS};
use ssh_keysmith::crypto::{assemble, openssh, pem, KeyMaterialBundle, RawKeyMaterial};

/// Synthetic 2048-bit modulus with the high bit set and a leading zero byte
fn modulus() -> Vec<u8> {
    let mut n = vec![0x00];
    n.extend((0..256u32).map(|i| (0xC1 ^ (i * 37)) as u8 | 0x01));
    n[1] |= 0x80;
    n
}

fn read_field(blob: &[u8]) -> (&[u8], &[u8]) {
    let len = u32::from_be_bytes([blob[0], blob[1], blob[2], blob[3]]) as usize;
    (&blob[4..4 + len], &blob[4 + len..])
}

#[test]
fn pem_example_matches_exactly() {
    assert_eq!(pem::encode("X", &[0x01, 0x02]), "-----BEGIN X-----\nAQI=\n-----END X-----\n");
}

#[test]
fn mpint_example_lengths() {
    let blob = openssh::public_key_blob(&[0x80], &[0x01, 0x00, 0x01]);

    let (key_type, rest) = read_field(&blob);
    assert_eq!(key_type, b"ssh-rsa");

    assert_eq!(&rest[..4], &[0, 0, 0, 3]);
    let (e, rest) = read_field(rest);
    assert_eq!(e, &[0x01, 0x00, 0x01]);

    assert_eq!(&rest[..4], &[0, 0, 0, 2]);
    let (n, rest) = read_field(rest);
    assert_eq!(n, &[0x00, 0x80]);
    assert!(rest.is_empty());
}

#[test]
fn openssh_line_round_trips_through_fields() {
    let n = modulus();
    let line = openssh::encode(&n, &[0x01, 0x00, 0x01], "dev@example.com");

    let payload = line.split(' ').nth(1).unwrap();
    let blob = STANDARD.decode(payload).unwrap();

    let (key_type, rest) = read_field(&blob);
    let (e, rest) = read_field(rest);
    let (decoded_n, rest) = read_field(rest);

    assert_eq!(key_type, b"ssh-rsa");
    assert_eq!(e, &[0x01, 0x00, 0x01]);
    // Supplied leading zero was dropped, then one was re-added for the sign bit
    assert_eq!(decoded_n.len(), 257);
    assert_eq!(decoded_n[0], 0x00);
    assert_eq!(&decoded_n[1..], &n[1..]);
    assert!(rest.is_empty());
}

#[test]
fn openssh_line_parses_with_ssh_key() {
    let n = modulus();
    let line = openssh::encode(&n, &[0x01, 0x00, 0x01], "dev@example.com");

    let key = ssh_key::PublicKey::from_openssh(&line).unwrap();
    assert_eq!(key.comment(), "dev@example.com");
    assert_eq!(key.algorithm(), ssh_key::Algorithm::Rsa { hash: None });

    let rsa = key.key_data().rsa().unwrap();
    assert_eq!(rsa.e.as_positive_bytes(), Some(&[0x01, 0x00, 0x01][..]));
    assert_eq!(rsa.n.as_positive_bytes(), Some(&n[1..]));

    // Re-encoding with ssh-key yields the same line
    assert_eq!(key.to_openssh().unwrap(), line);
}

#[test]
fn generated_key_parses_with_ssh_key() {
    let raw = RawKeyMaterial::generate(1024, None).unwrap();
    let bundle = KeyMaterialBundle::from_raw(&raw, "id_rsa_ado", "AzureDevOps");

    let key = ssh_key::PublicKey::from_openssh(bundle.public_key_openssh()).unwrap();
    assert_eq!(key.comment(), "AzureDevOps");

    let rsa = key.key_data().rsa().unwrap();
    assert_eq!(rsa.n.as_positive_bytes(), Some(raw.modulus()));
    assert_eq!(rsa.e.as_positive_bytes(), Some(raw.exponent()));
}

#[test]
fn bundle_pem_round_trips() {
    let der: Vec<u8> = (0..600u32).map(|i| (i * 7 % 251) as u8).collect();
    let encrypted: Vec<u8> = der.iter().rev().copied().collect();

    let bundle = assemble(&der, Some(encrypted.as_slice()), &modulus(), &[0x03], "id_rsa_ado", "AzureDevOps");

    let body = |pem: &str| -> Vec<u8> {
        let inner: String = pem
            .lines()
            .filter(|line| !line.starts_with("-----"))
            .collect();
        STANDARD.decode(inner).unwrap()
    };

    assert_eq!(body(bundle.private_key_pem()), der);
    assert_eq!(body(bundle.encrypted_private_key_pem().unwrap()), encrypted);
    assert!(bundle.public_key_openssh().ends_with(" AzureDevOps"));
}

#[test]
fn config_merge_of_rendered_entry() {
    let block = HostEntry::azure_devops(std::path::Path::new("/home/me/.ssh"), "id_rsa_ado").render();
    let existing = "Host alpha\n  HostName alpha.example.com\n\nHost dev.azure.com\n  IdentityFile /old/key\n";

    let once = merge(existing, AZURE_DEVOPS_ALIAS, &block);
    assert_eq!(once, format!("Host alpha\n  HostName alpha.example.com\n\n{}", block));
    assert_eq!(merge(&once, AZURE_DEVOPS_ALIAS, &block), once);
    assert_eq!(merge("", AZURE_DEVOPS_ALIAS, &block), block);
}
