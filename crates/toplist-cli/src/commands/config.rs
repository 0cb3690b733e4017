use color_eyre::Result;

use crate::output::Output;

pub fn run_show(output: &Output) -> Result<()> {
    let (mut config, store) = super::load_environment()?;

    // Never print the secret; keep enough to recognize it.
    config.trakt.client_secret = mask(&config.trakt.client_secret);

    let rendered = toml::to_string_pretty(&config)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to render config: {}", e))?;
    output.info(rendered);

    match store.load() {
        Some(_) => output.info(format!("Token: persisted at {}", store.path().display())),
        None => output.warn("Token: none persisted (run `toplist auth`)"),
    }

    Ok(())
}

fn mask(secret: &str) -> String {
    if secret.chars().count() <= 4 {
        "****".to_string()
    } else {
        let prefix: String = secret.chars().take(4).collect();
        format!("{}****", prefix)
    }
}

#[cfg(test)]
mod tests {
    use super::mask;

    #[test]
    fn mask_keeps_a_short_prefix() {
        assert_eq!(mask("abcdefgh"), "abcd****");
        assert_eq!(mask("abc"), "****");
        assert_eq!(mask(""), "****");
    }

    #[test]
    fn mask_handles_multibyte_secrets() {
        assert_eq!(mask("sécrèt-vàlué"), "sécr****");
    }
}
