//! MCP Server implementation with Zephyr Scale tools.

use std::sync::Arc;

use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{
        CallToolResult, Content, ErrorData as McpError, Implementation, ProtocolVersion,
        ServerCapabilities, ServerInfo,
    },
    tool, tool_handler, tool_router, ServerHandler,
};
use serde_json::{json, Value};

use crate::client::ZephyrClient;
use crate::debug::DebugLogger;
use crate::endpoints::{self, Endpoint, ToolRequest, API_INFO_TOOL};
use crate::error::ToolError;
use crate::params::*;
use crate::payload::parse_json_payload;
use crate::shaping;

/// Zephyr Scale MCP Server.
#[derive(Clone)]
pub struct ZephyrScaleServer {
    client: ZephyrClient,
    debug: Arc<DebugLogger>,
    tool_router: ToolRouter<Self>,
}

impl ZephyrScaleServer {
    pub fn new(client: ZephyrClient, debug: Arc<DebugLogger>) -> Self {
        Self {
            client,
            debug,
            tool_router: Self::tool_router(),
        }
    }

    /// Log the call, run the endpoint and turn the outcome into a tool result.
    async fn run(
        &self,
        endpoint: &Endpoint,
        logged: Value,
        request: Result<ToolRequest, ToolError>,
    ) -> Result<CallToolResult, McpError> {
        self.debug.log_tool_call(endpoint.name, &logged);

        let outcome = match request {
            Ok(request) => endpoints::invoke(&self.client, endpoint, request).await,
            Err(e) => Err(e),
        };

        Ok(self.finish(endpoint.name, outcome))
    }

    fn finish(&self, tool: &str, outcome: Result<String, ToolError>) -> CallToolResult {
        match outcome {
            Ok(text) => {
                self.debug.log_tool_result(tool, &json!(text));
                CallToolResult::success(vec![Content::text(text)])
            }
            Err(e) => {
                if e.is_local() {
                    tracing::warn!(tool = tool, "{}", e);
                }
                match e {
                    ToolError::Api(ref api) => self.debug.log_tool_result(tool, &api.to_record()),
                    _ => self.debug.log_error(tool, &e.to_string()),
                }
                // Failures are plain text results; the `Error: ` prefix is the only marker.
                CallToolResult::success(vec![Content::text(format!("Error: {}", e))])
            }
        }
    }
}

/// Parse a raw JSON argument into a request body.
fn json_body(raw: &str, field: &'static str) -> Result<ToolRequest, ToolError> {
    parse_json_payload(raw, field).map(|body| ToolRequest::new().body(body))
}

// ============================================================================
// Tool Implementations
// ============================================================================

#[tool_router]
impl ZephyrScaleServer {
    // ========================================================================
    // Test Case Tools
    // ========================================================================

    #[tool(description = "Get test cases from Zephyr Scale. Returns a condensed listing with pagination.")]
    async fn get_test_cases(&self, Parameters(params): Parameters<GetTestCasesParams>) -> Result<CallToolResult, McpError> {
        let request = ToolRequest::new().query(params.query());
        self.run(&endpoints::GET_TEST_CASES, json!(params), Ok(request)).await
    }

    #[tool(description = "Get a specific test case by key.")]
    async fn get_test_case(&self, Parameters(params): Parameters<TestCaseKeyParams>) -> Result<CallToolResult, McpError> {
        let request = ToolRequest::new().path("testCaseKey", &params.test_case_key);
        self.run(&endpoints::GET_TEST_CASE, json!(params), Ok(request)).await
    }

    #[tool(description = "Create a new test case. Required: project_key and name.")]
    async fn create_test_case(&self, Parameters(params): Parameters<CreateTestCaseParams>) -> Result<CallToolResult, McpError> {
        let request = ToolRequest::new().body(params.body());
        self.run(&endpoints::CREATE_TEST_CASE, json!(params), Ok(request)).await
    }

    #[tool(description = "Update an existing test case. test_case_data is a JSON string with the fields to update.")]
    async fn update_test_case(&self, Parameters(params): Parameters<UpdateTestCaseParams>) -> Result<CallToolResult, McpError> {
        let request = json_body(&params.test_case_data, "test_case_data")
            .map(|r| r.path("testCaseKey", &params.test_case_key));
        self.run(&endpoints::UPDATE_TEST_CASE, json!(params), request).await
    }

    #[tool(description = "Get all links for a test case.")]
    async fn get_test_case_links(&self, Parameters(params): Parameters<TestCaseKeyParams>) -> Result<CallToolResult, McpError> {
        let request = ToolRequest::new().path("testCaseKey", &params.test_case_key);
        self.run(&endpoints::GET_TEST_CASE_LINKS, json!(params), Ok(request)).await
    }

    #[tool(description = "Create a link between a test case and a Jira issue.")]
    async fn create_test_case_issue_link(&self, Parameters(params): Parameters<CreateTestCaseIssueLinkParams>) -> Result<CallToolResult, McpError> {
        let request = ToolRequest::new()
            .path("testCaseKey", &params.test_case_key)
            .body(params.body());
        self.run(&endpoints::CREATE_TEST_CASE_ISSUE_LINK, json!(params), Ok(request)).await
    }

    #[tool(description = "Create a web link for a test case.")]
    async fn create_test_case_web_link(&self, Parameters(params): Parameters<CreateTestCaseWebLinkParams>) -> Result<CallToolResult, McpError> {
        let request = ToolRequest::new()
            .path("testCaseKey", &params.test_case_key)
            .body(params.body());
        self.run(&endpoints::CREATE_TEST_CASE_WEB_LINK, json!(params), Ok(request)).await
    }

    #[tool(description = "Get all versions of a test case.")]
    async fn get_test_case_versions(&self, Parameters(params): Parameters<TestCasePageParams>) -> Result<CallToolResult, McpError> {
        let request = ToolRequest::new()
            .path("testCaseKey", &params.test_case_key)
            .query(params.query());
        self.run(&endpoints::GET_TEST_CASE_VERSIONS, json!(params), Ok(request)).await
    }

    #[tool(description = "Get a specific version of a test case.")]
    async fn get_test_case_version(&self, Parameters(params): Parameters<GetTestCaseVersionParams>) -> Result<CallToolResult, McpError> {
        let request = ToolRequest::new()
            .path("testCaseKey", &params.test_case_key)
            .path("version", params.version);
        self.run(&endpoints::GET_TEST_CASE_VERSION, json!(params), Ok(request)).await
    }

    #[tool(description = "Get the test script for a test case.")]
    async fn get_test_case_script(&self, Parameters(params): Parameters<TestCaseKeyParams>) -> Result<CallToolResult, McpError> {
        let request = ToolRequest::new().path("testCaseKey", &params.test_case_key);
        self.run(&endpoints::GET_TEST_CASE_SCRIPT, json!(params), Ok(request)).await
    }

    #[tool(description = "Create or update a test script for a test case. script_type is 'plain' or 'bdd'.")]
    async fn create_test_case_script(&self, Parameters(params): Parameters<CreateTestCaseScriptParams>) -> Result<CallToolResult, McpError> {
        let request = ToolRequest::new()
            .path("testCaseKey", &params.test_case_key)
            .body(params.body());
        self.run(&endpoints::CREATE_TEST_CASE_SCRIPT, json!(params), Ok(request)).await
    }

    #[tool(description = "Get test steps for a test case.")]
    async fn get_test_case_steps(&self, Parameters(params): Parameters<TestCasePageParams>) -> Result<CallToolResult, McpError> {
        let request = ToolRequest::new()
            .path("testCaseKey", &params.test_case_key)
            .query(params.query());
        self.run(&endpoints::GET_TEST_CASE_STEPS, json!(params), Ok(request)).await
    }

    #[tool(description = "Create test steps for a test case. steps_data is a JSON string with the steps payload.")]
    async fn create_test_case_steps(&self, Parameters(params): Parameters<CreateTestCaseStepsParams>) -> Result<CallToolResult, McpError> {
        let request = json_body(&params.steps_data, "steps_data")
            .map(|r| r.path("testCaseKey", &params.test_case_key));
        self.run(&endpoints::CREATE_TEST_CASE_STEPS, json!(params), request).await
    }

    // ========================================================================
    // Folder Tools
    // ========================================================================

    #[tool(description = "Get folders from Zephyr Scale.")]
    async fn get_folders(&self, Parameters(params): Parameters<GetFoldersParams>) -> Result<CallToolResult, McpError> {
        let request = ToolRequest::new().query(params.query());
        self.run(&endpoints::GET_FOLDERS, json!(params), Ok(request)).await
    }

    #[tool(description = "Get a specific folder by ID.")]
    async fn get_folder(&self, Parameters(params): Parameters<FolderIdParams>) -> Result<CallToolResult, McpError> {
        let request = ToolRequest::new().path("folderId", params.folder_id);
        self.run(&endpoints::GET_FOLDER, json!(params), Ok(request)).await
    }

    #[tool(description = "Create a new folder. folder_type is TEST_CASE, TEST_PLAN or TEST_CYCLE.")]
    async fn create_folder(&self, Parameters(params): Parameters<CreateFolderParams>) -> Result<CallToolResult, McpError> {
        let request = ToolRequest::new().body(params.body());
        self.run(&endpoints::CREATE_FOLDER, json!(params), Ok(request)).await
    }

    // ========================================================================
    // Test Cycle Tools
    // ========================================================================

    #[tool(description = "Get test cycles from Zephyr Scale.")]
    async fn get_test_cycles(&self, Parameters(params): Parameters<GetTestCyclesParams>) -> Result<CallToolResult, McpError> {
        let request = ToolRequest::new().query(params.query());
        self.run(&endpoints::GET_TEST_CYCLES, json!(params), Ok(request)).await
    }

    #[tool(description = "Get a specific test cycle by ID or key.")]
    async fn get_test_cycle(&self, Parameters(params): Parameters<TestCycleParams>) -> Result<CallToolResult, McpError> {
        let request = ToolRequest::new().path("testCycleIdOrKey", &params.test_cycle_id_or_key);
        self.run(&endpoints::GET_TEST_CYCLE, json!(params), Ok(request)).await
    }

    #[tool(description = "Create a new test cycle. Required: project_key and name.")]
    async fn create_test_cycle(&self, Parameters(params): Parameters<CreateTestCycleParams>) -> Result<CallToolResult, McpError> {
        let request = ToolRequest::new().body(params.body());
        self.run(&endpoints::CREATE_TEST_CYCLE, json!(params), Ok(request)).await
    }

    #[tool(description = "Update an existing test cycle. test_cycle_data is a JSON string with the fields to update.")]
    async fn update_test_cycle(&self, Parameters(params): Parameters<UpdateTestCycleParams>) -> Result<CallToolResult, McpError> {
        let request = json_body(&params.test_cycle_data, "test_cycle_data")
            .map(|r| r.path("testCycleIdOrKey", &params.test_cycle_id_or_key));
        self.run(&endpoints::UPDATE_TEST_CYCLE, json!(params), request).await
    }

    // ========================================================================
    // Test Execution Tools
    // ========================================================================

    #[tool(description = "Get test executions from Zephyr Scale.")]
    async fn get_test_executions(&self, Parameters(params): Parameters<GetTestExecutionsParams>) -> Result<CallToolResult, McpError> {
        let request = ToolRequest::new().query(params.query());
        self.run(&endpoints::GET_TEST_EXECUTIONS, json!(params), Ok(request)).await
    }

    #[tool(description = "Get a specific test execution by ID or key.")]
    async fn get_test_execution(&self, Parameters(params): Parameters<GetTestExecutionParams>) -> Result<CallToolResult, McpError> {
        let request = ToolRequest::new()
            .path("testExecutionIdOrKey", &params.test_execution_id_or_key)
            .query(params.query());
        self.run(&endpoints::GET_TEST_EXECUTION, json!(params), Ok(request)).await
    }

    #[tool(description = "Create a new test execution. Required: project_key, test_case_key, test_cycle_key and status_name.")]
    async fn create_test_execution(&self, Parameters(params): Parameters<CreateTestExecutionParams>) -> Result<CallToolResult, McpError> {
        let request = ToolRequest::new().body(params.body());
        self.run(&endpoints::CREATE_TEST_EXECUTION, json!(params), Ok(request)).await
    }

    #[tool(description = "Update an existing test execution. execution_data is a JSON string with the fields to update.")]
    async fn update_test_execution(&self, Parameters(params): Parameters<UpdateTestExecutionParams>) -> Result<CallToolResult, McpError> {
        let request = json_body(&params.execution_data, "execution_data")
            .map(|r| r.path("testExecutionIdOrKey", &params.test_execution_id_or_key));
        self.run(&endpoints::UPDATE_TEST_EXECUTION, json!(params), request).await
    }

    // ========================================================================
    // Project Tools
    // ========================================================================

    #[tool(description = "Get all projects from Zephyr Scale.")]
    async fn get_projects(&self, Parameters(params): Parameters<PageParams>) -> Result<CallToolResult, McpError> {
        let request = ToolRequest::new().query(params.query());
        self.run(&endpoints::GET_PROJECTS, json!(params), Ok(request)).await
    }

    #[tool(description = "Get a specific project by ID or key.")]
    async fn get_project(&self, Parameters(params): Parameters<ProjectParams>) -> Result<CallToolResult, McpError> {
        let request = ToolRequest::new().path("projectIdOrKey", &params.project_id_or_key);
        self.run(&endpoints::GET_PROJECT, json!(params), Ok(request)).await
    }

    // ========================================================================
    // Priority Tools
    // ========================================================================

    #[tool(description = "Get priorities from Zephyr Scale.")]
    async fn get_priorities(&self, Parameters(params): Parameters<ProjectPageParams>) -> Result<CallToolResult, McpError> {
        let request = ToolRequest::new().query(params.query());
        self.run(&endpoints::GET_PRIORITIES, json!(params), Ok(request)).await
    }

    #[tool(description = "Get a specific priority by ID.")]
    async fn get_priority(&self, Parameters(params): Parameters<PriorityIdParams>) -> Result<CallToolResult, McpError> {
        let request = ToolRequest::new().path("priorityId", params.priority_id);
        self.run(&endpoints::GET_PRIORITY, json!(params), Ok(request)).await
    }

    #[tool(description = "Create a new priority.")]
    async fn create_priority(&self, Parameters(params): Parameters<CreatePriorityParams>) -> Result<CallToolResult, McpError> {
        let request = ToolRequest::new().body(params.body());
        self.run(&endpoints::CREATE_PRIORITY, json!(params), Ok(request)).await
    }

    #[tool(description = "Update an existing priority. priority_data is a JSON string with the fields to update.")]
    async fn update_priority(&self, Parameters(params): Parameters<UpdatePriorityParams>) -> Result<CallToolResult, McpError> {
        let request = json_body(&params.priority_data, "priority_data")
            .map(|r| r.path("priorityId", params.priority_id));
        self.run(&endpoints::UPDATE_PRIORITY, json!(params), request).await
    }

    // ========================================================================
    // Status Tools
    // ========================================================================

    #[tool(description = "Get statuses from Zephyr Scale.")]
    async fn get_statuses(&self, Parameters(params): Parameters<GetStatusesParams>) -> Result<CallToolResult, McpError> {
        let request = ToolRequest::new().query(params.query());
        self.run(&endpoints::GET_STATUSES, json!(params), Ok(request)).await
    }

    #[tool(description = "Get a specific status by ID.")]
    async fn get_status(&self, Parameters(params): Parameters<StatusIdParams>) -> Result<CallToolResult, McpError> {
        let request = ToolRequest::new().path("statusId", params.status_id);
        self.run(&endpoints::GET_STATUS, json!(params), Ok(request)).await
    }

    #[tool(description = "Create a new status. status_type is TEST_CASE, TEST_PLAN, TEST_CYCLE or TEST_EXECUTION.")]
    async fn create_status(&self, Parameters(params): Parameters<CreateStatusParams>) -> Result<CallToolResult, McpError> {
        let request = ToolRequest::new().body(params.body());
        self.run(&endpoints::CREATE_STATUS, json!(params), Ok(request)).await
    }

    #[tool(description = "Update an existing status. status_data is a JSON string with the fields to update.")]
    async fn update_status(&self, Parameters(params): Parameters<UpdateStatusParams>) -> Result<CallToolResult, McpError> {
        let request = json_body(&params.status_data, "status_data")
            .map(|r| r.path("statusId", params.status_id));
        self.run(&endpoints::UPDATE_STATUS, json!(params), request).await
    }

    // ========================================================================
    // Environment Tools
    // ========================================================================

    #[tool(description = "Get environments from Zephyr Scale.")]
    async fn get_environments(&self, Parameters(params): Parameters<ProjectPageParams>) -> Result<CallToolResult, McpError> {
        let request = ToolRequest::new().query(params.query());
        self.run(&endpoints::GET_ENVIRONMENTS, json!(params), Ok(request)).await
    }

    #[tool(description = "Get a specific environment by ID.")]
    async fn get_environment(&self, Parameters(params): Parameters<EnvironmentIdParams>) -> Result<CallToolResult, McpError> {
        let request = ToolRequest::new().path("environmentId", params.environment_id);
        self.run(&endpoints::GET_ENVIRONMENT, json!(params), Ok(request)).await
    }

    #[tool(description = "Create a new environment.")]
    async fn create_environment(&self, Parameters(params): Parameters<CreateEnvironmentParams>) -> Result<CallToolResult, McpError> {
        let request = ToolRequest::new().body(params.body());
        self.run(&endpoints::CREATE_ENVIRONMENT, json!(params), Ok(request)).await
    }

    #[tool(description = "Update an existing environment. environment_data is a JSON string with the fields to update.")]
    async fn update_environment(&self, Parameters(params): Parameters<UpdateEnvironmentParams>) -> Result<CallToolResult, McpError> {
        let request = json_body(&params.environment_data, "environment_data")
            .map(|r| r.path("environmentId", params.environment_id));
        self.run(&endpoints::UPDATE_ENVIRONMENT, json!(params), request).await
    }

    // ========================================================================
    // Link Tools
    // ========================================================================

    #[tool(description = "Delete a link by ID.")]
    async fn delete_link(&self, Parameters(params): Parameters<LinkIdParams>) -> Result<CallToolResult, McpError> {
        let request = ToolRequest::new().path("linkId", params.link_id);
        self.run(&endpoints::DELETE_LINK, json!(params), Ok(request)).await
    }

    #[tool(description = "Get test cases linked to a Jira issue.")]
    async fn get_issue_link_test_cases(&self, Parameters(params): Parameters<IssueKeyParams>) -> Result<CallToolResult, McpError> {
        let request = ToolRequest::new().path("issueKey", &params.issue_key);
        self.run(&endpoints::GET_ISSUE_LINK_TEST_CASES, json!(params), Ok(request)).await
    }

    #[tool(description = "Get test cycles linked to a Jira issue.")]
    async fn get_issue_link_test_cycles(&self, Parameters(params): Parameters<IssueKeyParams>) -> Result<CallToolResult, McpError> {
        let request = ToolRequest::new().path("issueKey", &params.issue_key);
        self.run(&endpoints::GET_ISSUE_LINK_TEST_CYCLES, json!(params), Ok(request)).await
    }

    #[tool(description = "Get test plans linked to a Jira issue.")]
    async fn get_issue_link_test_plans(&self, Parameters(params): Parameters<IssueKeyParams>) -> Result<CallToolResult, McpError> {
        let request = ToolRequest::new().path("issueKey", &params.issue_key);
        self.run(&endpoints::GET_ISSUE_LINK_TEST_PLANS, json!(params), Ok(request)).await
    }

    #[tool(description = "Get test executions linked to a Jira issue.")]
    async fn get_issue_link_test_executions(&self, Parameters(params): Parameters<IssueKeyParams>) -> Result<CallToolResult, McpError> {
        let request = ToolRequest::new().path("issueKey", &params.issue_key);
        self.run(&endpoints::GET_ISSUE_LINK_TEST_EXECUTIONS, json!(params), Ok(request)).await
    }

    // ========================================================================
    // Utility Tools
    // ========================================================================

    #[tool(description = "Check the health of the Zephyr Scale API.")]
    async fn health_check(&self) -> Result<CallToolResult, McpError> {
        self.run(&endpoints::HEALTH_CHECK, json!({}), Ok(ToolRequest::new())).await
    }

    #[tool(description = "Get information about the Zephyr Scale MCP server configuration.")]
    async fn get_api_info(&self) -> Result<CallToolResult, McpError> {
        self.debug.log_tool_call(API_INFO_TOOL, &json!({}));

        let config = self.client.config();
        let info = json!({
            "api_base": config.api_base_url(),
            "region": config.region.label(),
            "authentication": config.token.scheme(),
            "available_endpoints": endpoints::catalog(),
        });

        Ok(self.finish(API_INFO_TOOL, shaping::pretty(&info)))
    }
}

#[tool_handler]
impl ServerHandler for ZephyrScaleServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation::from_build_env(),
            instructions: Some(
                "Zephyr Scale MCP Server - Manage test cases, folders, test cycles, test executions, \
                projects, priorities, statuses, environments and issue links through the Zephyr \
                Scale Cloud API.".to_string()
            ),
        }
    }
}
