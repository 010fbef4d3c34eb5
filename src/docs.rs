//! Static documentation topics and the error-debugging prompt
//!
//! Topics are served as `docs://{topic}` resources by the MCP server.

/// URI scheme prefix for documentation resources
pub const DOCS_SCHEME: &str = "docs://";

/// URI template advertised for documentation resources
pub const DOCS_TEMPLATE: &str = "docs://{topic}";

/// Name of the error-debugging prompt
pub const DEBUG_PROMPT: &str = "debug_error";

const TESTING: &str = r#"
# Nextflow Testing Guidelines

Nextflow tests are organized into the following categories:
- Unit tests: Test individual components
- Integration tests: Test the workflow system
- Functional tests: Test complete pipeline execution

## Running Tests
- Unit tests: `make test`
- Integration tests: `make integration-tests`
- Specific test: `./gradlew test --tests TestName`
- Plugin test: `make test module=plugins:nf-amazon class=nextflow.cloud.aws.AwsClientFactoryTest`
"#;

const CONTRIBUTING: &str = r#"
# Contributing to Nextflow

1. Fork the repository
2. Create a feature branch
3. Make your changes
4. Write tests for your changes
5. Run tests with `make test`
6. Submit a pull request

See the full guidelines at: https://www.nextflow.io/docs/latest/developer/index.html
"#;

/// Known topics with a one-line description each
pub const TOPICS: &[(&str, &str)] = &[
    ("testing", "How Nextflow tests are organized and run"),
    ("contributing", "How to contribute changes to Nextflow"),
];

/// Documentation text for a topic
///
/// Unknown topics produce a not-found message rather than an error.
pub fn topic(name: &str) -> String {
    match name {
        "testing" => TESTING.to_string(),
        "contributing" => CONTRIBUTING.to_string(),
        _ => format!("Documentation for '{}' not found.", name),
    }
}

/// URI of a documentation topic
pub fn topic_uri(name: &str) -> String {
    format!("{}{}", DOCS_SCHEME, name)
}

/// Extract the topic from a `docs://` URI
pub fn parse_uri(uri: &str) -> Option<&str> {
    uri.strip_prefix(DOCS_SCHEME)
}

/// Prompt text asking for help with a Nextflow development error
pub fn debug_error_prompt(error: &str) -> String {
    format!(
        "I'm encountering the following error while developing Nextflow:\n\n\
         {}\n\n\
         Please help me understand:\n\
         1. What might be causing this error\n\
         2. How to fix it\n\
         3. Any relevant parts of the Nextflow codebase I should investigate\n",
        error
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_topics() {
        assert!(topic("testing").contains("# Nextflow Testing Guidelines"));
        assert!(topic("testing").contains("./gradlew test --tests TestName"));
        assert!(topic("contributing").contains("# Contributing to Nextflow"));
    }

    #[test]
    fn test_every_listed_topic_resolves() {
        for (name, _) in TOPICS {
            assert!(!topic(name).contains("not found"), "{} should resolve", name);
        }
    }

    #[test]
    fn test_unknown_topic() {
        assert_eq!(topic("release"), "Documentation for 'release' not found.");
    }

    #[test]
    fn test_uri_round_trip() {
        assert_eq!(topic_uri("testing"), "docs://testing");
        assert_eq!(parse_uri("docs://testing"), Some("testing"));
        assert_eq!(parse_uri("file:///etc/passwd"), None);
    }

    #[test]
    fn test_debug_error_prompt() {
        let prompt = debug_error_prompt("java.lang.NullPointerException");
        assert!(prompt.contains("\n\njava.lang.NullPointerException\n\n"));
        assert!(prompt.contains("1. What might be causing this error"));
        assert!(prompt.contains("3. Any relevant parts of the Nextflow codebase"));
    }
}
