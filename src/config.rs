//! Command line configuration.

use anyhow::{Context, Result, bail};
use clap::Parser;
use std::io::Read;
use std::path::PathBuf;

use crate::convert::ImageProxy;
use crate::formatter::{CommentFormatter, DEFAULT_MAX_LINK_LEN};
use crate::highlight::{DEFAULT_STYLE, Style};

/// Command line configuration for commentfmt.
#[derive(Debug, Clone, Parser)]
#[command(name = "commentfmt", version, about, long_about = None)]
pub struct Config {
    /// Markdown file to format, reads stdin when omitted
    pub input: Option<PathBuf>,

    /// Syntax highlighting style (InspiredGitHub, Solarized (dark), etc.)
    #[arg(long, default_value = DEFAULT_STYLE)]
    pub style: String,

    /// Reject style names that would fall back to the default theme
    #[arg(long)]
    pub strict_style: bool,

    /// Maximum visible length of shortened auto links
    #[arg(long, default_value_t = DEFAULT_MAX_LINK_LEN)]
    pub max_link_len: usize,

    /// Base URL of the image proxy; enables proxying of http images
    #[arg(long)]
    pub image_proxy: Option<String>,

    /// Proxy https images as well
    #[arg(long, requires = "image_proxy")]
    pub proxy_all_images: bool,

    /// Print the stylesheet for the style instead of formatting
    #[arg(long)]
    pub stylesheet: bool,

    /// List available style names
    #[arg(long)]
    pub list_styles: bool,
}

impl Config {
    /// Parses configuration from command line arguments.
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Validates configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the input file does not exist, the image proxy URL
    /// is not an absolute http(s) URL, or strict style checking rejects
    /// the style name.
    pub fn validate(&self) -> Result<()> {
        if let Some(input) = &self.input {
            if !input.exists() {
                bail!("Input file does not exist: {}", input.display());
            }
        }

        if let Some(proxy) = &self.image_proxy {
            let url = url::Url::parse(proxy)
                .with_context(|| format!("Invalid image proxy URL: {}", proxy))?;
            if !matches!(url.scheme(), "http" | "https") {
                bail!("Image proxy URL must use http or https: {}", proxy);
            }
        }

        if self.strict_style {
            Style::new(self.style.as_str())
                .validate()
                .context("Style check failed")?;
        }

        Ok(())
    }

    /// Builds the formatter described by this configuration.
    pub fn formatter(&self) -> CommentFormatter {
        let mut builder = CommentFormatter::builder()
            .style(self.style.as_str())
            .max_link_len(self.max_link_len);

        if let Some(proxy) = &self.image_proxy {
            builder = builder.converter(ImageProxy::new(proxy).proxy_all(self.proxy_all_images));
        }

        builder.build()
    }

    /// Reads the markdown to format from the input file or stdin.
    ///
    /// # Errors
    ///
    /// Returns error if the input cannot be read or is not UTF-8.
    pub fn read_input(&self) -> Result<String> {
        match &self.input {
            Some(path) => std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read input file: {}", path.display())),
            None => {
                let mut text = String::new();
                std::io::stdin()
                    .read_to_string(&mut text)
                    .context("Failed to read stdin")?;
                Ok(text)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        Config {
            input: None,
            style: DEFAULT_STYLE.to_string(),
            strict_style: false,
            max_link_len: DEFAULT_MAX_LINK_LEN,
            image_proxy: None,
            proxy_all_images: false,
            stylesheet: false,
            list_styles: false,
        }
    }

    #[test]
    fn test_config_defaults_from_args() {
        // Act
        let config = Config::try_parse_from(["commentfmt"]).expect("Should parse");

        // Assert
        assert_eq!(config.style, "monokailight");
        assert_eq!(config.max_link_len, 48);
        assert!(config.input.is_none());
        assert!(config.image_proxy.is_none());
    }

    #[test]
    fn test_config_parses_flags() {
        // Act
        let config = Config::try_parse_from([
            "commentfmt",
            "comment.md",
            "--style",
            "Solarized (dark)",
            "--max-link-len",
            "20",
            "--image-proxy",
            "https://remark.example.com",
            "--proxy-all-images",
        ])
        .expect("Should parse");

        // Assert
        assert_eq!(config.input, Some(PathBuf::from("comment.md")));
        assert_eq!(config.style, "Solarized (dark)");
        assert_eq!(config.max_link_len, 20);
        assert!(config.proxy_all_images);
    }

    #[test]
    fn test_config_proxy_all_requires_proxy() {
        // Act
        let result = Config::try_parse_from(["commentfmt", "--proxy-all-images"]);

        // Assert
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_default_config() {
        // Act & Assert
        assert!(config().validate().is_ok());
    }

    #[test]
    fn test_validate_missing_input() {
        // Arrange
        let config = Config {
            input: Some(PathBuf::from("/nonexistent/comment.md")),
            ..config()
        };

        // Act
        let result = config.validate();

        // Assert
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_bad_proxy_url() {
        // Arrange
        let relative = Config {
            image_proxy: Some("/img".to_string()),
            ..config()
        };
        let ftp = Config {
            image_proxy: Some("ftp://example.com".to_string()),
            ..config()
        };

        // Act & Assert
        assert!(relative.validate().is_err());
        assert!(ftp.validate().is_err());
    }

    #[test]
    fn test_validate_strict_style() {
        // Arrange
        let unknown = Config {
            strict_style: true,
            ..config()
        };
        let known = Config {
            strict_style: true,
            style: "InspiredGitHub".to_string(),
            ..config()
        };

        // Act & Assert
        assert!(unknown.validate().is_err(), "monokailight is not bundled");
        assert!(known.validate().is_ok());
    }

    #[test]
    fn test_formatter_from_config() {
        // Arrange
        let config = Config {
            style: "Solarized (light)".to_string(),
            max_link_len: 20,
            ..config()
        };

        // Act
        let formatter = config.formatter();

        // Assert
        assert_eq!(formatter.style().name(), "Solarized (light)");
        assert_eq!(formatter.max_link_len(), 20);
    }

    #[test]
    fn test_formatter_with_image_proxy() {
        // Arrange
        let config = Config {
            image_proxy: Some("https://remark.example.com".to_string()),
            ..config()
        };

        // Act
        let html = config
            .formatter()
            .format_text("![cat](http://img.example.com/cat.png)")
            .expect("Should format");

        // Assert
        assert!(
            html.contains("src=\"https://remark.example.com/api/v1/img?src="),
            "Image should be proxied: {}",
            html
        );
    }

    #[test]
    fn test_read_input_from_file() -> Result<()> {
        // Arrange
        let dir = tempfile::TempDir::new()?;
        let path = dir.path().join("comment.md");
        std::fs::write(&path, "hello *world*")?;
        let config = Config {
            input: Some(path),
            ..config()
        };

        // Act
        let text = config.read_input()?;

        // Assert
        assert_eq!(text, "hello *world*");
        Ok(())
    }
}
