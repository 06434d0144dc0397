//! Tool parameter structs and their mapping onto upstream field names.

use rmcp::schemars::{self, JsonSchema};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::payload::{Params, Truthy};

fn default_max_results() -> i64 {
    25
}

fn default_nested_max_results() -> i64 {
    10
}

// ============================================================================
// Enumerations
// ============================================================================

/// Folder type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FolderType {
    TestCase,
    TestPlan,
    TestCycle,
}

/// Status type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StatusType {
    TestCase,
    TestPlan,
    TestCycle,
    TestExecution,
}

/// Test script type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ScriptType {
    Plain,
    Bdd,
}

impl FolderType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FolderType::TestCase => "TEST_CASE",
            FolderType::TestPlan => "TEST_PLAN",
            FolderType::TestCycle => "TEST_CYCLE",
        }
    }
}

impl StatusType {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusType::TestCase => "TEST_CASE",
            StatusType::TestPlan => "TEST_PLAN",
            StatusType::TestCycle => "TEST_CYCLE",
            StatusType::TestExecution => "TEST_EXECUTION",
        }
    }
}

impl ScriptType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScriptType::Plain => "plain",
            ScriptType::Bdd => "bdd",
        }
    }
}

impl From<FolderType> for Value {
    fn from(value: FolderType) -> Self {
        Value::from(value.as_str())
    }
}

impl From<StatusType> for Value {
    fn from(value: StatusType) -> Self {
        Value::from(value.as_str())
    }
}

impl From<ScriptType> for Value {
    fn from(value: ScriptType) -> Self {
        Value::from(value.as_str())
    }
}

impl Truthy for FolderType {
    fn is_truthy(&self) -> bool {
        true
    }
}

impl Truthy for StatusType {
    fn is_truthy(&self) -> bool {
        true
    }
}

// ============================================================================
// Shared parameter shapes
// ============================================================================

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct TestCaseKeyParams {
    /// The test case key (e.g. 'PROJ-T123')
    pub test_case_key: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct PageParams {
    /// Maximum number of results to return (default: 25, max: 1000)
    #[serde(default = "default_max_results")]
    pub max_results: i64,
    /// Zero-indexed starting position (default: 0)
    #[serde(default)]
    pub start_at: i64,
}

impl PageParams {
    pub fn query(&self) -> Params {
        Params::new().page(self.max_results, self.start_at)
    }
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct ProjectPageParams {
    /// Optional project key filter (e.g. 'SM')
    pub project_key: Option<String>,
    /// Maximum number of results to return (default: 25, max: 1000)
    #[serde(default = "default_max_results")]
    pub max_results: i64,
    /// Zero-indexed starting position (default: 0)
    #[serde(default)]
    pub start_at: i64,
}

impl ProjectPageParams {
    pub fn query(&self) -> Params {
        Params::new()
            .page(self.max_results, self.start_at)
            .optional("projectKey", self.project_key.clone())
    }
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct IssueKeyParams {
    /// The Jira issue key (e.g. 'PROJ-123')
    pub issue_key: String,
}

// ============================================================================
// Test cases
// ============================================================================

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct GetTestCasesParams {
    /// Project key (e.g. 'SM')
    pub project_key: String,
    /// Optional folder ID to filter test cases
    pub folder_id: Option<i64>,
    /// Maximum number of test cases to return (default: 25, max: 1000)
    #[serde(default = "default_max_results")]
    pub max_results: i64,
    /// Zero-indexed starting position (default: 0)
    #[serde(default)]
    pub start_at: i64,
}

impl GetTestCasesParams {
    pub fn query(&self) -> Params {
        Params::new()
            .required("projectKey", self.project_key.as_str())
            .page(self.max_results, self.start_at)
            .optional("folderId", self.folder_id)
    }
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct CreateTestCaseParams {
    /// Project key (e.g. 'SM')
    pub project_key: String,
    /// Test case name
    pub name: String,
    /// Test case objective/description
    pub objective: Option<String>,
    /// Any preconditions
    pub precondition: Option<String>,
    /// Priority name (e.g. 'High', 'Normal')
    pub priority_name: Option<String>,
    /// Status name (e.g. 'Draft', 'Approved')
    pub status_name: Option<String>,
    /// ID of folder to place test case in
    pub folder_id: Option<i64>,
    /// Jira user account ID
    pub owner_id: Option<String>,
    /// Estimated duration in milliseconds
    pub estimated_time: Option<i64>,
    /// Jira component ID
    pub component_id: Option<i64>,
    /// List of labels
    pub labels: Option<Vec<String>>,
}

impl CreateTestCaseParams {
    pub fn body(&self) -> Value {
        Params::new()
            .required("projectKey", self.project_key.as_str())
            .required("name", self.name.as_str())
            .optional("objective", self.objective.clone())
            .optional("precondition", self.precondition.clone())
            .optional("priorityName", self.priority_name.clone())
            .optional("statusName", self.status_name.clone())
            .optional("folderId", self.folder_id)
            .optional("ownerId", self.owner_id.clone())
            .optional("estimatedTime", self.estimated_time)
            .optional("componentId", self.component_id)
            .optional("labels", self.labels.clone())
            .into_value()
    }
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct UpdateTestCaseParams {
    /// The test case key (e.g. 'PROJ-T123')
    pub test_case_key: String,
    /// JSON string containing the test case data to update
    pub test_case_data: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct CreateTestCaseIssueLinkParams {
    /// The test case key (e.g. 'PROJ-T123')
    pub test_case_key: String,
    /// The Jira issue ID
    pub issue_id: i64,
}

impl CreateTestCaseIssueLinkParams {
    pub fn body(&self) -> Value {
        Params::new().required("issueId", self.issue_id).into_value()
    }
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct CreateTestCaseWebLinkParams {
    /// The test case key (e.g. 'PROJ-T123')
    pub test_case_key: String,
    /// The URL to link to
    pub url_link: String,
    /// Optional description for the link
    pub description: Option<String>,
}

impl CreateTestCaseWebLinkParams {
    pub fn body(&self) -> Value {
        Params::new()
            .required("url", self.url_link.as_str())
            .optional("description", self.description.clone())
            .into_value()
    }
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct TestCasePageParams {
    /// The test case key (e.g. 'PROJ-T123')
    pub test_case_key: String,
    /// Maximum number of results to return (default: 10, max: 1000)
    #[serde(default = "default_nested_max_results")]
    pub max_results: i64,
    /// Zero-indexed starting position (default: 0)
    #[serde(default)]
    pub start_at: i64,
}

impl TestCasePageParams {
    pub fn query(&self) -> Params {
        Params::new().page(self.max_results, self.start_at)
    }
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct GetTestCaseVersionParams {
    /// The test case key (e.g. 'PROJ-T123')
    pub test_case_key: String,
    /// Version number to retrieve
    pub version: i64,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct CreateTestCaseScriptParams {
    /// The test case key (e.g. 'PROJ-T123')
    pub test_case_key: String,
    /// Type of script ('plain' or 'bdd')
    pub script_type: ScriptType,
    /// The script content
    pub text: String,
}

impl CreateTestCaseScriptParams {
    pub fn body(&self) -> Value {
        Params::new()
            .required("type", self.script_type)
            .required("text", self.text.as_str())
            .into_value()
    }
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct CreateTestCaseStepsParams {
    /// The test case key (e.g. 'PROJ-T123')
    pub test_case_key: String,
    /// JSON string containing the test steps data
    pub steps_data: String,
}

// ============================================================================
// Folders
// ============================================================================

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct GetFoldersParams {
    /// Optional project key filter (e.g. 'SM')
    pub project_key: Option<String>,
    /// Optional folder type filter
    pub folder_type: Option<FolderType>,
    /// Maximum number of folders to return (default: 25, max: 1000)
    #[serde(default = "default_max_results")]
    pub max_results: i64,
    /// Zero-indexed starting position (default: 0)
    #[serde(default)]
    pub start_at: i64,
}

impl GetFoldersParams {
    pub fn query(&self) -> Params {
        Params::new()
            .page(self.max_results, self.start_at)
            .optional("projectKey", self.project_key.clone())
            .optional("folderType", self.folder_type)
    }
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct FolderIdParams {
    /// The folder ID
    pub folder_id: i64,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct CreateFolderParams {
    /// Project key (e.g. 'SM')
    pub project_key: String,
    /// Folder name
    pub name: String,
    /// Folder type
    pub folder_type: FolderType,
    /// Optional parent folder ID (omit for root folders)
    pub parent_id: Option<i64>,
}

impl CreateFolderParams {
    pub fn body(&self) -> Value {
        Params::new()
            .required("projectKey", self.project_key.as_str())
            .required("name", self.name.as_str())
            .required("folderType", self.folder_type)
            .optional("parentId", self.parent_id)
            .into_value()
    }
}

// ============================================================================
// Test cycles
// ============================================================================

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct GetTestCyclesParams {
    /// Optional project key filter (e.g. 'SM')
    pub project_key: Option<String>,
    /// Optional folder ID filter
    pub folder_id: Option<i64>,
    /// Optional Jira project version ID filter
    pub jira_project_version_id: Option<i64>,
    /// Maximum number of test cycles to return (default: 25, max: 1000)
    #[serde(default = "default_max_results")]
    pub max_results: i64,
    /// Zero-indexed starting position (default: 0)
    #[serde(default)]
    pub start_at: i64,
}

impl GetTestCyclesParams {
    pub fn query(&self) -> Params {
        Params::new()
            .page(self.max_results, self.start_at)
            .optional("projectKey", self.project_key.clone())
            .optional("folderId", self.folder_id)
            .optional("jiraProjectVersionId", self.jira_project_version_id)
    }
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct TestCycleParams {
    /// The test cycle ID or key (e.g. 'PROJ-R123' or '123')
    pub test_cycle_id_or_key: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct CreateTestCycleParams {
    /// Project key (e.g. 'SM')
    pub project_key: String,
    /// Test cycle name
    pub name: String,
    /// Optional description
    pub description: Option<String>,
    /// Planned start date (format: yyyy-MM-dd'T'HH:mm:ss'Z')
    pub planned_start_date: Option<String>,
    /// Planned end date (format: yyyy-MM-dd'T'HH:mm:ss'Z')
    pub planned_end_date: Option<String>,
    /// Status name
    pub status_name: Option<String>,
    /// Optional folder ID
    pub folder_id: Option<i64>,
    /// Jira user account ID
    pub owner_id: Option<String>,
    /// Jira project version ID
    pub jira_project_version_id: Option<i64>,
}

impl CreateTestCycleParams {
    pub fn body(&self) -> Value {
        Params::new()
            .required("projectKey", self.project_key.as_str())
            .required("name", self.name.as_str())
            .optional("description", self.description.clone())
            .optional("plannedStartDate", self.planned_start_date.clone())
            .optional("plannedEndDate", self.planned_end_date.clone())
            .optional("statusName", self.status_name.clone())
            .optional("folderId", self.folder_id)
            .optional("ownerId", self.owner_id.clone())
            // The create endpoint names this field without the `Id` suffix.
            .optional("jiraProjectVersion", self.jira_project_version_id)
            .into_value()
    }
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct UpdateTestCycleParams {
    /// The test cycle ID or key (e.g. 'PROJ-R123' or '123')
    pub test_cycle_id_or_key: String,
    /// JSON string containing the test cycle data to update
    pub test_cycle_data: String,
}

// ============================================================================
// Test executions
// ============================================================================

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct GetTestExecutionsParams {
    /// Optional project key filter (e.g. 'SM')
    pub project_key: Option<String>,
    /// Optional test cycle key filter
    pub test_cycle: Option<String>,
    /// Optional test case key filter
    pub test_case: Option<String>,
    /// Filter for actual end date after (format: yyyy-MM-dd'T'HH:mm:ss'Z')
    pub actual_end_date_after: Option<String>,
    /// Filter for actual end date before (format: yyyy-MM-dd'T'HH:mm:ss'Z')
    pub actual_end_date_before: Option<String>,
    /// Optional Jira project version ID filter
    pub jira_project_version_id: Option<i64>,
    /// If true, includes only the last execution of each test cycle item
    #[serde(default)]
    pub only_last_executions: bool,
    /// If true, execution step issue links will be included
    #[serde(default)]
    pub include_step_links: bool,
    /// Maximum number of test executions to return (default: 25, max: 1000)
    #[serde(default = "default_max_results")]
    pub max_results: i64,
    /// Zero-indexed starting position (default: 0)
    #[serde(default)]
    pub start_at: i64,
}

impl GetTestExecutionsParams {
    pub fn query(&self) -> Params {
        Params::new()
            .page(self.max_results, self.start_at)
            .required("onlyLastExecutions", self.only_last_executions)
            .required("includeStepLinks", self.include_step_links)
            .optional("projectKey", self.project_key.clone())
            .optional("testCycle", self.test_cycle.clone())
            .optional("testCase", self.test_case.clone())
            .optional("actualEndDateAfter", self.actual_end_date_after.clone())
            .optional("actualEndDateBefore", self.actual_end_date_before.clone())
            .optional("jiraProjectVersionId", self.jira_project_version_id)
    }
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct GetTestExecutionParams {
    /// The test execution ID or key (e.g. 'PROJ-E123' or '123')
    pub test_execution_id_or_key: String,
    /// If true, execution step issue links will be included
    #[serde(default)]
    pub include_step_links: bool,
}

impl GetTestExecutionParams {
    pub fn query(&self) -> Params {
        Params::new().required("includeStepLinks", self.include_step_links)
    }
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct CreateTestExecutionParams {
    /// Project key (e.g. 'SM')
    pub project_key: String,
    /// Test case key (e.g. 'PROJ-T123')
    pub test_case_key: String,
    /// Test cycle key (e.g. 'PROJ-R123')
    pub test_cycle_key: String,
    /// Status name (e.g. 'Pass', 'Fail')
    pub status_name: String,
    /// Optional environment name
    pub environment_name: Option<String>,
    /// Actual end date (format: yyyy-MM-dd'T'HH:mm:ss'Z')
    pub actual_end_date: Option<String>,
    /// Actual execution time in milliseconds
    pub execution_time: Option<i64>,
    /// Jira user account ID of executor
    pub executed_by_id: Option<String>,
    /// Jira user account ID of assignee
    pub assigned_to_id: Option<String>,
    /// Optional comment
    pub comment: Option<String>,
}

impl CreateTestExecutionParams {
    pub fn body(&self) -> Value {
        Params::new()
            .required("projectKey", self.project_key.as_str())
            .required("testCaseKey", self.test_case_key.as_str())
            .required("testCycleKey", self.test_cycle_key.as_str())
            .required("statusName", self.status_name.as_str())
            .optional("environmentName", self.environment_name.clone())
            .optional("actualEndDate", self.actual_end_date.clone())
            .optional("executionTime", self.execution_time)
            .optional("executedById", self.executed_by_id.clone())
            .optional("assignedToId", self.assigned_to_id.clone())
            .optional("comment", self.comment.clone())
            .into_value()
    }
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct UpdateTestExecutionParams {
    /// The test execution ID or key (e.g. 'PROJ-E123' or '123')
    pub test_execution_id_or_key: String,
    /// JSON string containing the test execution data to update
    pub execution_data: String,
}

// ============================================================================
// Projects
// ============================================================================

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct ProjectParams {
    /// The project ID or key (e.g. 'PROJ' or '123')
    pub project_id_or_key: String,
}

// ============================================================================
// Priorities
// ============================================================================

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct PriorityIdParams {
    /// The priority ID
    pub priority_id: i64,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct CreatePriorityParams {
    /// Project key (e.g. 'SM')
    pub project_key: String,
    /// Priority name
    pub name: String,
    /// Optional priority description
    pub description: Option<String>,
    /// Optional color in hexadecimal format (e.g. '#FF0000')
    pub color: Option<String>,
}

impl CreatePriorityParams {
    pub fn body(&self) -> Value {
        Params::new()
            .required("projectKey", self.project_key.as_str())
            .required("name", self.name.as_str())
            .optional("description", self.description.clone())
            .optional("color", self.color.clone())
            .into_value()
    }
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct UpdatePriorityParams {
    /// The priority ID
    pub priority_id: i64,
    /// JSON string containing the priority data to update
    pub priority_data: String,
}

// ============================================================================
// Statuses
// ============================================================================

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct GetStatusesParams {
    /// Optional project key filter (e.g. 'SM')
    pub project_key: Option<String>,
    /// Optional status type filter
    pub status_type: Option<StatusType>,
    /// Maximum number of statuses to return (default: 25, max: 1000)
    #[serde(default = "default_max_results")]
    pub max_results: i64,
    /// Zero-indexed starting position (default: 0)
    #[serde(default)]
    pub start_at: i64,
}

impl GetStatusesParams {
    pub fn query(&self) -> Params {
        Params::new()
            .page(self.max_results, self.start_at)
            .optional("projectKey", self.project_key.clone())
            .optional("statusType", self.status_type)
    }
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct StatusIdParams {
    /// The status ID
    pub status_id: i64,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct CreateStatusParams {
    /// Project key (e.g. 'SM')
    pub project_key: String,
    /// Status name
    pub name: String,
    /// Status type
    pub status_type: StatusType,
    /// Optional status description
    pub description: Option<String>,
    /// Optional color in hexadecimal format (e.g. '#FF0000')
    pub color: Option<String>,
}

impl CreateStatusParams {
    pub fn body(&self) -> Value {
        Params::new()
            .required("projectKey", self.project_key.as_str())
            .required("name", self.name.as_str())
            .required("type", self.status_type)
            .optional("description", self.description.clone())
            .optional("color", self.color.clone())
            .into_value()
    }
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct UpdateStatusParams {
    /// The status ID
    pub status_id: i64,
    /// JSON string containing the status data to update
    pub status_data: String,
}

// ============================================================================
// Environments
// ============================================================================

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct EnvironmentIdParams {
    /// The environment ID
    pub environment_id: i64,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct CreateEnvironmentParams {
    /// Project key (e.g. 'SM')
    pub project_key: String,
    /// Environment name
    pub name: String,
    /// Optional environment description
    pub description: Option<String>,
}

impl CreateEnvironmentParams {
    pub fn body(&self) -> Value {
        Params::new()
            .required("projectKey", self.project_key.as_str())
            .required("name", self.name.as_str())
            .optional("description", self.description.clone())
            .into_value()
    }
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct UpdateEnvironmentParams {
    /// The environment ID
    pub environment_id: i64,
    /// JSON string containing the environment data to update
    pub environment_data: String,
}

// ============================================================================
// Links
// ============================================================================

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct LinkIdParams {
    /// The link ID to delete
    pub link_id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_create_test_case_minimal_body() {
        let params: CreateTestCaseParams =
            serde_json::from_value(json!({"project_key": "SM", "name": "Login works"})).unwrap();
        assert_eq!(
            serde_json::to_string(&params.body()).unwrap(),
            r#"{"projectKey":"SM","name":"Login works"}"#
        );
    }

    #[test]
    fn test_create_test_case_drops_falsy_optionals() {
        let params: CreateTestCaseParams = serde_json::from_value(json!({
            "project_key": "SM",
            "name": "Login works",
            "objective": "",
            "folder_id": 0,
            "estimated_time": 0,
            "labels": []
        }))
        .unwrap();
        assert_eq!(
            params.body(),
            json!({"projectKey": "SM", "name": "Login works"})
        );
    }

    #[test]
    fn test_create_test_case_full_body() {
        let params: CreateTestCaseParams = serde_json::from_value(json!({
            "project_key": "SM",
            "name": "Login works",
            "objective": "Verify login",
            "precondition": "User exists",
            "priority_name": "High",
            "status_name": "Draft",
            "folder_id": 12,
            "owner_id": "acc-1",
            "estimated_time": 60000,
            "component_id": 3,
            "labels": ["smoke", "auth"]
        }))
        .unwrap();
        assert_eq!(
            params.body(),
            json!({
                "projectKey": "SM",
                "name": "Login works",
                "objective": "Verify login",
                "precondition": "User exists",
                "priorityName": "High",
                "statusName": "Draft",
                "folderId": 12,
                "ownerId": "acc-1",
                "estimatedTime": 60000,
                "componentId": 3,
                "labels": ["smoke", "auth"]
            })
        );
    }

    #[test]
    fn test_page_defaults_apply_when_omitted() {
        let params: GetTestCasesParams =
            serde_json::from_value(json!({"project_key": "SM"})).unwrap();
        assert_eq!(params.max_results, 25);
        assert_eq!(params.start_at, 0);

        let nested: TestCasePageParams =
            serde_json::from_value(json!({"test_case_key": "SM-T1"})).unwrap();
        assert_eq!(nested.max_results, 10);
    }

    #[test]
    fn test_get_test_cases_query_clamps_and_maps_folder() {
        let params = GetTestCasesParams {
            project_key: "SM".to_string(),
            folder_id: Some(7),
            max_results: 5000,
            start_at: 50,
        };
        assert_eq!(
            params.query().into_value(),
            json!({"projectKey": "SM", "maxResults": 1000, "startAt": 50, "folderId": 7})
        );
    }

    #[test]
    fn test_folder_type_uses_upstream_spelling() {
        let params: CreateFolderParams = serde_json::from_value(json!({
            "project_key": "SM",
            "name": "Regression",
            "folder_type": "TEST_CYCLE"
        }))
        .unwrap();
        assert_eq!(
            params.body(),
            json!({"projectKey": "SM", "name": "Regression", "folderType": "TEST_CYCLE"})
        );
    }

    #[test]
    fn test_unknown_folder_type_is_rejected() {
        let result = serde_json::from_value::<CreateFolderParams>(json!({
            "project_key": "SM",
            "name": "Regression",
            "folder_type": "TEST_SUITE"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_create_test_cycle_maps_version_without_id_suffix() {
        let params: CreateTestCycleParams = serde_json::from_value(json!({
            "project_key": "SM",
            "name": "Sprint 1",
            "jira_project_version_id": 10001
        }))
        .unwrap();
        assert_eq!(
            params.body(),
            json!({"projectKey": "SM", "name": "Sprint 1", "jiraProjectVersion": 10001})
        );
    }

    #[test]
    fn test_execution_flags_are_always_sent() {
        let params: GetTestExecutionsParams = serde_json::from_value(json!({})).unwrap();
        assert_eq!(
            params.query().into_value(),
            json!({
                "maxResults": 25,
                "startAt": 0,
                "onlyLastExecutions": false,
                "includeStepLinks": false
            })
        );

        let single: GetTestExecutionParams =
            serde_json::from_value(json!({"test_execution_id_or_key": "SM-E1"})).unwrap();
        assert_eq!(
            single.query().into_value(),
            json!({"includeStepLinks": false})
        );
    }

    #[test]
    fn test_create_status_and_script_use_type_field() {
        let status: CreateStatusParams = serde_json::from_value(json!({
            "project_key": "SM",
            "name": "Blocked",
            "status_type": "TEST_EXECUTION",
            "color": ""
        }))
        .unwrap();
        assert_eq!(
            status.body(),
            json!({"projectKey": "SM", "name": "Blocked", "type": "TEST_EXECUTION"})
        );

        let script: CreateTestCaseScriptParams = serde_json::from_value(json!({
            "test_case_key": "SM-T1",
            "script_type": "bdd",
            "text": "Given a user"
        }))
        .unwrap();
        assert_eq!(script.body(), json!({"type": "bdd", "text": "Given a user"}));
    }

    #[test]
    fn test_statuses_query_with_filters() {
        let params = GetStatusesParams {
            project_key: Some("SM".to_string()),
            status_type: Some(StatusType::TestCase),
            max_results: 10,
            start_at: 0,
        };
        assert_eq!(
            params.query().into_value(),
            json!({"maxResults": 10, "startAt": 0, "projectKey": "SM", "statusType": "TEST_CASE"})
        );
    }
}
