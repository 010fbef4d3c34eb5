//! MCP Server implementation
//!
//! Implements the Nextflow developer tools, documentation resources and the
//! debugging prompt using the rmcp SDK. Every tool returns a single text
//! payload; failures are rendered as text rather than protocol errors.

use std::sync::Arc;

use rmcp::model::{
    AnnotateAble, GetPromptRequestParam, GetPromptResult, Implementation, JsonObject,
    ListPromptsResult, ListResourceTemplatesResult, ListResourcesResult, PaginatedRequestParam,
    Prompt, PromptArgument, PromptMessage, PromptMessageContent, PromptMessageRole,
    PromptsCapability, RawResource, RawResourceTemplate, ReadResourceRequestParam,
    ReadResourceResult, ResourceContents, ResourcesCapability, ServerCapabilities, ServerInfo,
    ToolsCapability,
};
use rmcp::service::RequestContext;
use rmcp::{tool, Error as McpError, RoleServer, ServerHandler};
use schemars::JsonSchema;
use serde::Deserialize;

use crate::config::Config;
use crate::docs;
use crate::error::render;
use crate::tools::DevTools;

/// MCP Server for Nextflow development
#[derive(Clone)]
pub struct DevToolsServer {
    tools: Arc<DevTools>,
}

impl DevToolsServer {
    /// Create a server spawning real processes
    pub fn new(config: Config) -> Self {
        Self::with_tools(DevTools::new(config))
    }

    /// Create a server around existing tools
    pub fn with_tools(tools: DevTools) -> Self {
        Self {
            tools: Arc::new(tools),
        }
    }

    /// Underlying tool operations
    pub fn tools(&self) -> &DevTools {
        &self.tools
    }
}

// === Tool Parameter Types ===

/// Parameters for set_nextflow_directory
#[derive(Debug, Deserialize, JsonSchema)]
pub struct SetDirectoryParams {
    /// Path to the Nextflow development directory (`~` is expanded)
    pub path: String,
}

/// Parameters for run_make_command
#[derive(Debug, Deserialize, JsonSchema)]
pub struct RunMakeCommandParams {
    /// Make target to run (e.g., "test", "compile", "clean")
    pub command: String,
}

/// Parameters for run_specific_test
#[derive(Debug, Deserialize, JsonSchema)]
pub struct RunTestParams {
    /// Test class or pattern passed to `--tests` (e.g., "nextflow.util.CacheTest")
    pub test_path: String,
}

/// Parameters for run_development_nextflow
#[derive(Debug, Deserialize, JsonSchema)]
pub struct RunDevelopmentParams {
    /// Nextflow command and options (e.g., "run hello.nf", "-version")
    #[serde(default)]
    pub command: Option<String>,
}

/// Parameters for run_plugin_test
#[derive(Debug, Deserialize, JsonSchema)]
pub struct RunPluginTestParams {
    /// Module to test (e.g., "nextflow", "plugins:nf-amazon")
    pub module: String,

    /// Test class or method (e.g., "nextflow.util.CacheTest")
    #[serde(default)]
    pub class_name: Option<String>,
}

// === MCP Tool Implementations ===

#[tool(tool_box)]
impl DevToolsServer {
    #[tool(description = "List all available make targets in the Nextflow Makefile.")]
    pub async fn list_make_targets(&self) -> String {
        render(&self.tools.list_targets().await)
    }

    #[tool(description = "Set the Nextflow development directory path.")]
    pub async fn set_nextflow_directory(&self, #[tool(aggr)] params: SetDirectoryParams) -> String {
        render(&self.tools.set_project_directory(&params.path).await)
    }

    #[tool(description = "Get the current Nextflow development directory path.")]
    pub async fn get_nextflow_directory(&self) -> String {
        render(&self.tools.get_project_directory().await)
    }

    /// Only targets declared in the Makefile are run
    #[tool(
        description = "Run a make command in the Nextflow repository. The target must be declared in the Makefile."
    )]
    pub async fn run_make_command(&self, #[tool(aggr)] params: RunMakeCommandParams) -> String {
        render(&self.tools.run_make_command(&params.command).await)
    }

    #[tool(description = "Run a specific Nextflow test through the Gradle wrapper.")]
    pub async fn run_specific_test(&self, #[tool(aggr)] params: RunTestParams) -> String {
        render(&self.tools.run_specific_test(&params.test_path).await)
    }

    #[tool(description = "Build Nextflow from source using 'make compile', or 'make build' when there is no compile target.")]
    pub async fn build_nextflow(&self) -> String {
        render(&self.tools.build().await)
    }

    #[tool(description = "Run Nextflow integration tests.")]
    pub async fn run_integration_tests(&self) -> String {
        render(&self.tools.run_integration_tests().await)
    }

    #[tool(description = "Get the version of the built Nextflow launcher.")]
    pub async fn get_nextflow_version(&self) -> String {
        render(&self.tools.get_version().await)
    }

    #[tool(
        description = "Run the development version of Nextflow using the launch.sh script, compiling first when possible."
    )]
    pub async fn run_development_nextflow(
        &self,
        #[tool(aggr)] params: RunDevelopmentParams,
    ) -> String {
        render(&self.tools.run_development(params.command.as_deref()).await)
    }

    #[tool(
        description = "Run tests for a specific Nextflow plugin or module, optionally narrowed to a test class or method."
    )]
    pub async fn run_plugin_test(&self, #[tool(aggr)] params: RunPluginTestParams) -> String {
        render(
            &self
                .tools
                .run_module_test(&params.module, params.class_name.as_deref())
                .await,
        )
    }
}

#[tool(tool_box)]
impl ServerHandler for DevToolsServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: Default::default(),
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability {
                    list_changed: Some(false),
                }),
                resources: Some(ResourcesCapability {
                    subscribe: Some(false),
                    list_changed: Some(false),
                }),
                prompts: Some(PromptsCapability {
                    list_changed: Some(false),
                }),
                ..Default::default()
            },
            server_info: Implementation {
                name: "nextflow-devtools".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            instructions: Some(
                "Tools for Nextflow development and testing: discover and run Makefile targets, \
                 run Gradle tests, build from source and launch the development version."
                    .to_string(),
            ),
        }
    }

    async fn list_resources(
        &self,
        _request: PaginatedRequestParam,
        _: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, McpError> {
        Ok(doc_resources())
    }

    async fn list_resource_templates(
        &self,
        _request: PaginatedRequestParam,
        _: RequestContext<RoleServer>,
    ) -> Result<ListResourceTemplatesResult, McpError> {
        Ok(doc_templates())
    }

    async fn read_resource(
        &self,
        ReadResourceRequestParam { uri }: ReadResourceRequestParam,
        _: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, McpError> {
        read_doc(&uri)
    }

    async fn list_prompts(
        &self,
        _request: PaginatedRequestParam,
        _: RequestContext<RoleServer>,
    ) -> Result<ListPromptsResult, McpError> {
        Ok(prompts())
    }

    async fn get_prompt(
        &self,
        GetPromptRequestParam { name, arguments }: GetPromptRequestParam,
        _: RequestContext<RoleServer>,
    ) -> Result<GetPromptResult, McpError> {
        get_prompt(&name, arguments.as_ref())
    }
}

// === Resources & Prompts ===

fn doc_resources() -> ListResourcesResult {
    let resources = docs::TOPICS
        .iter()
        .map(|(name, description)| {
            let mut resource = RawResource::new(docs::topic_uri(name), name.to_string());
            resource.description = Some(description.to_string());
            resource.mime_type = Some("text/markdown".to_string());
            resource.no_annotation()
        })
        .collect();

    ListResourcesResult {
        resources,
        next_cursor: None,
    }
}

fn doc_templates() -> ListResourceTemplatesResult {
    let template = RawResourceTemplate {
        uri_template: docs::DOCS_TEMPLATE.to_string(),
        name: "Nextflow development docs".to_string(),
        description: Some(
            "Documentation about a Nextflow development topic (testing, contributing)".to_string(),
        ),
        mime_type: Some("text/markdown".to_string()),
    };

    ListResourceTemplatesResult {
        resource_templates: vec![template.no_annotation()],
        next_cursor: None,
    }
}

/// Read a `docs://{topic}` resource
///
/// Unknown topics resolve to a not-found text; other schemes are protocol errors.
fn read_doc(uri: &str) -> Result<ReadResourceResult, McpError> {
    let Some(topic) = docs::parse_uri(uri) else {
        return Err(McpError::resource_not_found(
            format!("Resource not found: {}", uri),
            Some(serde_json::json!({ "uri": uri })),
        ));
    };

    tracing::info!("Reading documentation topic: {}", topic);
    Ok(ReadResourceResult {
        contents: vec![ResourceContents::text(docs::topic(topic), uri)],
    })
}

fn prompts() -> ListPromptsResult {
    ListPromptsResult {
        prompts: vec![Prompt::new(
            docs::DEBUG_PROMPT,
            Some("Create a prompt to help debug Nextflow errors"),
            Some(vec![PromptArgument {
                name: "error".to_string(),
                description: Some("The error message to debug".to_string()),
                required: Some(true),
            }]),
        )],
        next_cursor: None,
    }
}

fn get_prompt(name: &str, arguments: Option<&JsonObject>) -> Result<GetPromptResult, McpError> {
    if name != docs::DEBUG_PROMPT {
        return Err(McpError::invalid_params(
            format!("Prompt not found: {}", name),
            None,
        ));
    }

    let error = arguments
        .and_then(|args| args.get("error"))
        .and_then(|value| value.as_str())
        .ok_or_else(|| McpError::invalid_params("Missing required argument: error", None))?;

    Ok(GetPromptResult {
        description: Some("Debug a Nextflow development error".to_string()),
        messages: vec![PromptMessage {
            role: PromptMessageRole::User,
            content: PromptMessageContent::text(docs::debug_error_prompt(error)),
        }],
    })
}
