//! Split a passphrase into five shares and recover it from three.

fn main() -> keyshard_core::Result<()> {
    keyshard_core::init()?;

    let secret = "correct horse battery staple";
    let shares = keyshard_core::split_text(secret, 5, 3)?;
    for (number, share) in shares.iter().enumerate() {
        println!("Share {}: {}", number + 1, share);
    }

    let recovered = keyshard_core::reconstruct(&[
        shares[0].clone(),
        shares[2].clone(),
        shares[4].clone(),
    ])?;
    println!("recovered: {}", String::from_utf8_lossy(&recovered));

    keyshard_core::teardown();
    Ok(())
}
