use crate::auth::password;

pub fn handle(plaintext: &str) -> anyhow::Result<()> {
    let digest = password::hash(plaintext)?;
    println!("{}", digest);
    Ok(())
}
