//! Declarative table of Zephyr Scale endpoints and the generic invoker.
//!
//! Each row fixes the HTTP method, URL template and response shaping of one
//! tool. Tools only supply path arguments, query and body; [`invoke`] does
//! the rest.

use serde_json::{json, Map, Value};

use crate::client::{HttpMethod, ZephyrClient};
use crate::error::ToolError;
use crate::payload::Params;
use crate::shaping::{self, Shape};

/// Tool groups, in the order they are reported by `get_api_info`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Group {
    TestCases,
    Folders,
    TestCycles,
    TestExecutions,
    Projects,
    Priorities,
    Statuses,
    Environments,
    Links,
    IssueLinks,
    Utilities,
}

impl Group {
    pub fn key(&self) -> &'static str {
        match self {
            Group::TestCases => "test_cases",
            Group::Folders => "folders",
            Group::TestCycles => "test_cycles",
            Group::TestExecutions => "test_executions",
            Group::Projects => "projects",
            Group::Priorities => "priorities",
            Group::Statuses => "statuses",
            Group::Environments => "environments",
            Group::Links => "links",
            Group::IssueLinks => "issue_links",
            Group::Utilities => "utilities",
        }
    }
}

/// One upstream endpoint exposed as a tool.
#[derive(Debug, Clone, Copy)]
pub struct Endpoint {
    pub name: &'static str,
    pub group: Group,
    pub method: HttpMethod,
    /// Path relative to the API base; `{name}` marks a path argument.
    pub path: &'static str,
    pub shape: Shape,
}

impl Endpoint {
    /// Substitute path arguments, percent-encoding each as one segment.
    pub fn render_path(&self, args: &[(&'static str, String)]) -> String {
        let mut path = self.path.to_string();
        for (name, value) in args {
            path = path.replace(&format!("{{{}}}", name), &urlencoding::encode(value));
        }
        path
    }
}

/// Everything a tool contributes to a request.
#[derive(Debug, Default, Clone)]
pub struct ToolRequest {
    path_args: Vec<(&'static str, String)>,
    query: Option<Params>,
    body: Option<Value>,
}

impl ToolRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn path(mut self, name: &'static str, value: impl ToString) -> Self {
        self.path_args.push((name, value.to_string()));
        self
    }

    pub fn query(mut self, query: Params) -> Self {
        self.query = Some(query);
        self
    }

    pub fn body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// Run one table row: build the URL, execute, shape the response.
pub async fn invoke(
    client: &ZephyrClient,
    endpoint: &Endpoint,
    request: ToolRequest,
) -> Result<String, ToolError> {
    let url = client.url(&endpoint.render_path(&request.path_args));
    let value = client
        .send(
            endpoint.method,
            &url,
            request.body.as_ref(),
            request.query.as_ref(),
        )
        .await?;
    shaping::render(endpoint.shape, value)
}

const fn endpoint(
    name: &'static str,
    group: Group,
    method: HttpMethod,
    path: &'static str,
    shape: Shape,
) -> Endpoint {
    Endpoint {
        name,
        group,
        method,
        path,
        shape,
    }
}

use Group::*;
use HttpMethod::{Delete, Get, Post, Put};
use Shape::{Confirm, Echo, TestCaseSummary};

// Test cases
pub const GET_TEST_CASES: Endpoint =
    endpoint("get_test_cases", TestCases, Get, "/testcases", TestCaseSummary);
pub const GET_TEST_CASE: Endpoint =
    endpoint("get_test_case", TestCases, Get, "/testcases/{testCaseKey}", Echo);
pub const CREATE_TEST_CASE: Endpoint =
    endpoint("create_test_case", TestCases, Post, "/testcases", Echo);
pub const UPDATE_TEST_CASE: Endpoint = endpoint(
    "update_test_case",
    TestCases,
    Put,
    "/testcases/{testCaseKey}",
    Confirm("Test case updated successfully"),
);
pub const GET_TEST_CASE_LINKS: Endpoint = endpoint(
    "get_test_case_links",
    TestCases,
    Get,
    "/testcases/{testCaseKey}/links",
    Echo,
);
pub const CREATE_TEST_CASE_ISSUE_LINK: Endpoint = endpoint(
    "create_test_case_issue_link",
    TestCases,
    Post,
    "/testcases/{testCaseKey}/links/issues",
    Echo,
);
pub const CREATE_TEST_CASE_WEB_LINK: Endpoint = endpoint(
    "create_test_case_web_link",
    TestCases,
    Post,
    "/testcases/{testCaseKey}/links/weblinks",
    Echo,
);
pub const GET_TEST_CASE_VERSIONS: Endpoint = endpoint(
    "get_test_case_versions",
    TestCases,
    Get,
    "/testcases/{testCaseKey}/versions",
    Echo,
);
pub const GET_TEST_CASE_VERSION: Endpoint = endpoint(
    "get_test_case_version",
    TestCases,
    Get,
    "/testcases/{testCaseKey}/versions/{version}",
    Echo,
);
pub const GET_TEST_CASE_SCRIPT: Endpoint = endpoint(
    "get_test_case_script",
    TestCases,
    Get,
    "/testcases/{testCaseKey}/testscript",
    Echo,
);
pub const CREATE_TEST_CASE_SCRIPT: Endpoint = endpoint(
    "create_test_case_script",
    TestCases,
    Post,
    "/testcases/{testCaseKey}/testscript",
    Echo,
);
pub const GET_TEST_CASE_STEPS: Endpoint = endpoint(
    "get_test_case_steps",
    TestCases,
    Get,
    "/testcases/{testCaseKey}/teststeps",
    Echo,
);
pub const CREATE_TEST_CASE_STEPS: Endpoint = endpoint(
    "create_test_case_steps",
    TestCases,
    Post,
    "/testcases/{testCaseKey}/teststeps",
    Echo,
);

// Folders
pub const GET_FOLDERS: Endpoint = endpoint("get_folders", Folders, Get, "/folders", Echo);
pub const GET_FOLDER: Endpoint = endpoint("get_folder", Folders, Get, "/folders/{folderId}", Echo);
pub const CREATE_FOLDER: Endpoint = endpoint("create_folder", Folders, Post, "/folders", Echo);

// Test cycles
pub const GET_TEST_CYCLES: Endpoint =
    endpoint("get_test_cycles", TestCycles, Get, "/testcycles", Echo);
pub const GET_TEST_CYCLE: Endpoint = endpoint(
    "get_test_cycle",
    TestCycles,
    Get,
    "/testcycles/{testCycleIdOrKey}",
    Echo,
);
pub const CREATE_TEST_CYCLE: Endpoint =
    endpoint("create_test_cycle", TestCycles, Post, "/testcycles", Echo);
pub const UPDATE_TEST_CYCLE: Endpoint = endpoint(
    "update_test_cycle",
    TestCycles,
    Put,
    "/testcycles/{testCycleIdOrKey}",
    Confirm("Test cycle updated successfully"),
);

// Test executions
pub const GET_TEST_EXECUTIONS: Endpoint =
    endpoint("get_test_executions", TestExecutions, Get, "/testexecutions", Echo);
pub const GET_TEST_EXECUTION: Endpoint = endpoint(
    "get_test_execution",
    TestExecutions,
    Get,
    "/testexecutions/{testExecutionIdOrKey}",
    Echo,
);
pub const CREATE_TEST_EXECUTION: Endpoint = endpoint(
    "create_test_execution",
    TestExecutions,
    Post,
    "/testexecutions",
    Echo,
);
pub const UPDATE_TEST_EXECUTION: Endpoint = endpoint(
    "update_test_execution",
    TestExecutions,
    Put,
    "/testexecutions/{testExecutionIdOrKey}",
    Confirm("Test execution updated successfully"),
);

// Projects
pub const GET_PROJECTS: Endpoint = endpoint("get_projects", Projects, Get, "/projects", Echo);
pub const GET_PROJECT: Endpoint =
    endpoint("get_project", Projects, Get, "/projects/{projectIdOrKey}", Echo);

// Priorities
pub const GET_PRIORITIES: Endpoint =
    endpoint("get_priorities", Priorities, Get, "/priorities", Echo);
pub const GET_PRIORITY: Endpoint =
    endpoint("get_priority", Priorities, Get, "/priorities/{priorityId}", Echo);
pub const CREATE_PRIORITY: Endpoint =
    endpoint("create_priority", Priorities, Post, "/priorities", Echo);
pub const UPDATE_PRIORITY: Endpoint = endpoint(
    "update_priority",
    Priorities,
    Put,
    "/priorities/{priorityId}",
    Confirm("Priority updated successfully"),
);

// Statuses
pub const GET_STATUSES: Endpoint = endpoint("get_statuses", Statuses, Get, "/statuses", Echo);
pub const GET_STATUS: Endpoint =
    endpoint("get_status", Statuses, Get, "/statuses/{statusId}", Echo);
pub const CREATE_STATUS: Endpoint = endpoint("create_status", Statuses, Post, "/statuses", Echo);
pub const UPDATE_STATUS: Endpoint = endpoint(
    "update_status",
    Statuses,
    Put,
    "/statuses/{statusId}",
    Confirm("Status updated successfully"),
);

// Environments
pub const GET_ENVIRONMENTS: Endpoint =
    endpoint("get_environments", Environments, Get, "/environments", Echo);
pub const GET_ENVIRONMENT: Endpoint = endpoint(
    "get_environment",
    Environments,
    Get,
    "/environments/{environmentId}",
    Echo,
);
pub const CREATE_ENVIRONMENT: Endpoint =
    endpoint("create_environment", Environments, Post, "/environments", Echo);
pub const UPDATE_ENVIRONMENT: Endpoint = endpoint(
    "update_environment",
    Environments,
    Put,
    "/environments/{environmentId}",
    Confirm("Environment updated successfully"),
);

// Links
pub const DELETE_LINK: Endpoint = endpoint(
    "delete_link",
    Links,
    Delete,
    "/links/{linkId}",
    Confirm("Link deleted successfully"),
);

// Issue links
pub const GET_ISSUE_LINK_TEST_CASES: Endpoint = endpoint(
    "get_issue_link_test_cases",
    IssueLinks,
    Get,
    "/issuelinks/{issueKey}/testcases",
    Echo,
);
pub const GET_ISSUE_LINK_TEST_CYCLES: Endpoint = endpoint(
    "get_issue_link_test_cycles",
    IssueLinks,
    Get,
    "/issuelinks/{issueKey}/testcycles",
    Echo,
);
pub const GET_ISSUE_LINK_TEST_PLANS: Endpoint = endpoint(
    "get_issue_link_test_plans",
    IssueLinks,
    Get,
    "/issuelinks/{issueKey}/testplans",
    Echo,
);
pub const GET_ISSUE_LINK_TEST_EXECUTIONS: Endpoint = endpoint(
    "get_issue_link_test_executions",
    IssueLinks,
    Get,
    "/issuelinks/{issueKey}/executions",
    Echo,
);

// Utilities
pub const HEALTH_CHECK: Endpoint = endpoint(
    "health_check",
    Utilities,
    Get,
    "/healthcheck",
    Confirm("API is healthy"),
);

/// Name of the local-only configuration tool.
pub const API_INFO_TOOL: &str = "get_api_info";

/// Every upstream-backed tool, in catalog order.
pub const ENDPOINTS: &[Endpoint] = &[
    GET_TEST_CASES,
    GET_TEST_CASE,
    CREATE_TEST_CASE,
    UPDATE_TEST_CASE,
    GET_TEST_CASE_LINKS,
    CREATE_TEST_CASE_ISSUE_LINK,
    CREATE_TEST_CASE_WEB_LINK,
    GET_TEST_CASE_VERSIONS,
    GET_TEST_CASE_VERSION,
    GET_TEST_CASE_SCRIPT,
    CREATE_TEST_CASE_SCRIPT,
    GET_TEST_CASE_STEPS,
    CREATE_TEST_CASE_STEPS,
    GET_FOLDERS,
    GET_FOLDER,
    CREATE_FOLDER,
    GET_TEST_CYCLES,
    GET_TEST_CYCLE,
    CREATE_TEST_CYCLE,
    UPDATE_TEST_CYCLE,
    GET_TEST_EXECUTIONS,
    GET_TEST_EXECUTION,
    CREATE_TEST_EXECUTION,
    UPDATE_TEST_EXECUTION,
    GET_PROJECTS,
    GET_PROJECT,
    GET_PRIORITIES,
    GET_PRIORITY,
    CREATE_PRIORITY,
    UPDATE_PRIORITY,
    GET_STATUSES,
    GET_STATUS,
    CREATE_STATUS,
    UPDATE_STATUS,
    GET_ENVIRONMENTS,
    GET_ENVIRONMENT,
    CREATE_ENVIRONMENT,
    UPDATE_ENVIRONMENT,
    DELETE_LINK,
    GET_ISSUE_LINK_TEST_CASES,
    GET_ISSUE_LINK_TEST_CYCLES,
    GET_ISSUE_LINK_TEST_PLANS,
    GET_ISSUE_LINK_TEST_EXECUTIONS,
    HEALTH_CHECK,
];

/// Tool names grouped by area, including the local `get_api_info`.
pub fn catalog() -> Value {
    let mut groups: Map<String, Value> = Map::new();
    for endpoint in ENDPOINTS {
        let names = groups
            .entry(endpoint.group.key())
            .or_insert_with(|| json!([]));
        if let Value::Array(names) = names {
            names.push(json!(endpoint.name));
        }
    }
    if let Some(Value::Array(names)) = groups.get_mut(Utilities.key()) {
        names.push(json!(API_INFO_TOOL));
    }
    Value::Object(groups)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_tool_names_are_unique() {
        let mut seen = HashSet::new();
        for endpoint in ENDPOINTS {
            assert!(seen.insert(endpoint.name), "duplicate tool {}", endpoint.name);
        }
        assert!(!seen.contains(API_INFO_TOOL));
        assert_eq!(ENDPOINTS.len(), 44);
    }

    #[test]
    fn test_updates_use_put_and_confirm() {
        for endpoint in ENDPOINTS.iter().filter(|e| e.name.starts_with("update_")) {
            assert_eq!(endpoint.method, HttpMethod::Put, "{}", endpoint.name);
            assert!(matches!(endpoint.shape, Shape::Confirm(_)), "{}", endpoint.name);
        }
    }

    #[test]
    fn test_render_path_encodes_segments() {
        let path = GET_TEST_CASE_VERSION.render_path(&[
            ("testCaseKey", "SM-T1".to_string()),
            ("version", 3.to_string()),
        ]);
        assert_eq!(path, "/testcases/SM-T1/versions/3");

        let path = GET_TEST_CASE.render_path(&[("testCaseKey", "../etc passwd".to_string())]);
        assert_eq!(path, "/testcases/..%2Fetc%20passwd");
    }

    #[test]
    fn test_templates_have_balanced_placeholders() {
        for endpoint in ENDPOINTS {
            assert_eq!(
                endpoint.path.matches('{').count(),
                endpoint.path.matches('}').count(),
                "{}",
                endpoint.name
            );
            assert!(endpoint.path.starts_with('/'), "{}", endpoint.name);
        }
    }

    #[test]
    fn test_catalog_groups_tools() {
        let catalog = catalog();
        assert_eq!(
            catalog["folders"],
            json!(["get_folders", "get_folder", "create_folder"])
        );
        assert_eq!(catalog["links"], json!(["delete_link"]));
        assert_eq!(
            catalog["utilities"],
            json!(["health_check", "get_api_info"])
        );
        assert_eq!(catalog["test_cases"].as_array().unwrap().len(), 13);

        let keys: Vec<&String> = catalog.as_object().unwrap().keys().collect();
        assert_eq!(keys.first().map(|k| k.as_str()), Some("test_cases"));
        assert_eq!(keys.last().map(|k| k.as_str()), Some("utilities"));
    }
}
