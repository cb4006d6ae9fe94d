//! Helm CLI backend
//!
//! Implements [`HelmBackend`] by shelling out to the `helm` binary and
//! decoding its JSON/YAML output.

use super::{BackendError, BackendResult, CommandExecutor, HelmBackend, ProcessExecutor};
use crate::models::{ChartDetails, ChartInfo, ChartListItem, InstallChartRequest, Release, Repo};
use async_trait::async_trait;
use std::io::Write;

/// helm's answer to `repo ls` when nothing is configured
const NO_REPOSITORIES: &str = "no repositories to show";

/// Backend that drives a local `helm` installation
pub struct HelmCli<E: CommandExecutor = ProcessExecutor> {
    executor: E,
    binary: String,
}

impl HelmCli<ProcessExecutor> {
    pub fn new(binary: impl Into<String>) -> Self {
        Self::with_executor(ProcessExecutor, binary)
    }
}

impl<E: CommandExecutor> HelmCli<E> {
    pub fn with_executor(executor: E, binary: impl Into<String>) -> Self {
        Self {
            executor,
            binary: binary.into(),
        }
    }

    async fn helm(&self, args: &[&str]) -> BackendResult<String> {
        let args: Vec<String> = args.iter().map(|a| a.to_string()).collect();
        self.executor.execute(&self.binary, &args).await
    }

    /// Name for the throwaway entry used to prove a repository URL
    fn probe_name(name: &str) -> String {
        format!(
            "{}-probe-{}",
            name,
            chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default()
        )
    }
}

#[async_trait]
impl<E: CommandExecutor> HelmBackend for HelmCli<E> {
    async fn list_releases(&self) -> BackendResult<Vec<Release>> {
        let output = self.helm(&["list", "-A", "-o", "json"]).await?;
        Ok(serde_json::from_str(&output)?)
    }

    async fn repos(&self) -> BackendResult<Vec<Repo>> {
        match self.helm(&["repo", "ls", "-o", "json"]).await {
            Ok(output) => Ok(serde_json::from_str(&output)?),
            Err(BackendError::Command(msg)) if msg.contains(NO_REPOSITORIES) => Ok(Vec::new()),
            Err(e) => Err(e),
        }
    }

    async fn version(&self) -> BackendResult<String> {
        let output = self.helm(&["version", "--template", "{{.Version}}"]).await?;
        Ok(output.trim().to_string())
    }

    async fn delete_repository(&self, name: &str) -> BackendResult<()> {
        self.helm(&["repo", "remove", name]).await?;
        tracing::info!("Removed repository {}", name);
        Ok(())
    }

    async fn add_repository(&self, name: &str, url: &str) -> BackendResult<()> {
        self.helm(&["repo", "add", name, url]).await?;
        tracing::info!("Added repository {} ({})", name, url);
        Ok(())
    }

    async fn update_repository(&self, old_name: &str, name: &str, url: &str) -> BackendResult<()> {
        // helm has no rename; make sure the new URL works before dropping the old entry
        let probe = Self::probe_name(name);
        self.add_repository(&probe, url).await?;
        self.delete_repository(&probe).await?;

        let old_url = self
            .repos()
            .await?
            .into_iter()
            .find(|r| r.name == old_name)
            .map(|r| r.url);
        self.delete_repository(old_name).await?;

        let Err(e) = self.add_repository(name, url).await else {
            return Ok(());
        };
        // the old entry is gone; put it back so the edit can be retried
        if let Some(old_url) = old_url {
            tracing::warn!("Adding {} failed, restoring {}: {}", name, old_name, e);
            if let Err(restore) = self.add_repository(old_name, &old_url).await {
                tracing::warn!("Could not restore repository {}: {}", old_name, restore);
            }
        }
        Err(e)
    }

    async fn refresh_repositories(&self) -> BackendResult<()> {
        self.helm(&["repo", "update"]).await?;
        Ok(())
    }

    async fn find_charts_in_repo(&self, filter: &str) -> BackendResult<Vec<ChartListItem>> {
        let output = self.helm(&["-o", "json", "search", "repo", filter]).await?;
        Ok(serde_json::from_str(&output)?)
    }

    async fn get_chart_details(&self, name: &str) -> BackendResult<ChartDetails> {
        let info = self.helm(&["show", "chart", name]).await?;
        let info: ChartInfo = serde_yaml::from_str(&info)?;
        let readme = self.helm(&["show", "readme", name]).await?;
        let values = self.helm(&["show", "values", name]).await?;

        Ok(ChartDetails {
            info,
            readme,
            values,
        })
    }

    async fn install_chart(&self, request: &InstallChartRequest) -> BackendResult<()> {
        let mut args = vec![
            "install".to_string(),
            request.name.clone(),
            request.chart_name.clone(),
            "--namespace".to_string(),
            request.namespace.clone(),
            "--create-namespace".to_string(),
        ];

        // Kept alive until helm has read it; removed on drop
        let values_file = match &request.values {
            Some(values) => {
                let prefix = format!(
                    "{}_{}_",
                    request.chart_name.replace(['/', '\\'], "_"),
                    request.name
                );
                let mut file = tempfile::Builder::new()
                    .prefix(&prefix)
                    .suffix(".yaml")
                    .tempfile()?;
                file.write_all(values.as_bytes())?;
                file.flush()?;
                args.push("-f".to_string());
                args.push(file.path().to_string_lossy().into_owned());
                Some(file)
            }
            None => None,
        };

        let result = self.executor.execute(&self.binary, &args).await;
        drop(values_file);
        result?;

        tracing::info!(
            "Installed {} as {} in namespace {}",
            request.chart_name,
            request.name,
            request.namespace
        );
        Ok(())
    }

    async fn uninstall_chart(&self, release_name: &str, namespace: &str) -> BackendResult<()> {
        self.helm(&["uninstall", release_name, "-n", namespace]).await?;
        tracing::info!("Uninstalled {} from namespace {}", release_name, namespace);
        Ok(())
    }

    async fn get_values(&self, release_name: &str, namespace: &str) -> BackendResult<String> {
        self.helm(&["get", "values", release_name, "-n", namespace, "-o", "yaml"])
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::executor::MockCommandExecutor;
    use mockall::Sequence;

    fn args_are(
        expected: &'static [&'static str],
    ) -> impl Fn(&str, &[String]) -> bool + Send + 'static {
        move |program: &str, args: &[String]| {
            program == "helm" && args.iter().map(String::as_str).eq(expected.iter().copied())
        }
    }

    #[tokio::test]
    async fn test_version_is_trimmed() {
        let mut executor = MockCommandExecutor::new();
        executor
            .expect_execute()
            .withf(args_are(&["version", "--template", "{{.Version}}"]))
            .times(1)
            .returning(|_, _| Ok("v3.14.2\n".to_string()));

        let helm = HelmCli::with_executor(executor, "helm");
        assert_eq!(helm.version().await.unwrap(), "v3.14.2");
    }

    #[tokio::test]
    async fn test_list_releases_across_namespaces() {
        let mut executor = MockCommandExecutor::new();
        executor
            .expect_execute()
            .withf(args_are(&["list", "-A", "-o", "json"]))
            .returning(|_, _| {
                Ok(r#"[{"name":"r1","namespace":"ns1","revision":"1","updated":"2024-01-02 03:04:05.123 +0000 UTC","status":"deployed","chart":"nginx-1.0.0","app_version":"1.25"}]"#.to_string())
            });

        let helm = HelmCli::with_executor(executor, "helm");
        let releases = helm.list_releases().await.unwrap();
        assert_eq!(releases.len(), 1);
        assert_eq!(releases[0].name, "r1");
        assert_eq!(releases[0].namespace, "ns1");
    }

    #[tokio::test]
    async fn test_no_repositories_is_empty_list() {
        let mut executor = MockCommandExecutor::new();
        executor.expect_execute().returning(|_, _| {
            Err(BackendError::Command(
                "Error: no repositories to show".to_string(),
            ))
        });

        let helm = HelmCli::with_executor(executor, "helm");
        assert!(helm.repos().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_other_repo_errors_propagate() {
        let mut executor = MockCommandExecutor::new();
        executor
            .expect_execute()
            .returning(|_, _| Err(BackendError::Command("boom".to_string())));

        let helm = HelmCli::with_executor(executor, "helm");
        assert_eq!(
            helm.repos().await.unwrap_err(),
            BackendError::Command("boom".to_string())
        );
    }

    #[tokio::test]
    async fn test_update_repository_probes_before_removing_old_entry() {
        let mut executor = MockCommandExecutor::new();
        let mut seq = Sequence::new();
        executor
            .expect_execute()
            .withf(|_, args: &[String]| {
                args.len() == 4 && args[1] == "add" && args[2].starts_with("stable-probe-")
            })
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(String::new()));
        executor
            .expect_execute()
            .withf(|_, args: &[String]| args[1] == "remove" && args[2].starts_with("stable-probe-"))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(String::new()));
        executor
            .expect_execute()
            .withf(args_are(&["repo", "ls", "-o", "json"]))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(r#"[{"name":"old","url":"https://old.example.com"}]"#.to_string()));
        executor
            .expect_execute()
            .withf(args_are(&["repo", "remove", "old"]))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(String::new()));
        executor
            .expect_execute()
            .withf(args_are(&["repo", "add", "stable", "https://charts.example.com"]))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(String::new()));

        let helm = HelmCli::with_executor(executor, "helm");
        helm.update_repository("old", "stable", "https://charts.example.com")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_update_repository_restores_old_entry_when_final_add_fails() {
        let mut executor = MockCommandExecutor::new();
        let mut seq = Sequence::new();
        executor
            .expect_execute()
            .withf(|_, args: &[String]| args[1] == "add" && args[2].starts_with("other-probe-"))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(String::new()));
        executor
            .expect_execute()
            .withf(|_, args: &[String]| args[1] == "remove" && args[2].starts_with("other-probe-"))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(String::new()));
        executor
            .expect_execute()
            .withf(args_are(&["repo", "ls", "-o", "json"]))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| {
                Ok(r#"[{"name":"old","url":"https://old.example.com"},{"name":"other","url":"https://other.example.com"}]"#.to_string())
            });
        executor
            .expect_execute()
            .withf(args_are(&["repo", "remove", "old"]))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(String::new()));
        executor
            .expect_execute()
            .withf(args_are(&["repo", "add", "other", "https://new.example.com"]))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| {
                Err(BackendError::Command(
                    "repository name (other) already exists".to_string(),
                ))
            });
        executor
            .expect_execute()
            .withf(args_are(&["repo", "add", "old", "https://old.example.com"]))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(String::new()));

        let helm = HelmCli::with_executor(executor, "helm");
        let err = helm
            .update_repository("old", "other", "https://new.example.com")
            .await
            .unwrap_err();
        assert_eq!(
            err,
            BackendError::Command("repository name (other) already exists".to_string())
        );
    }

    #[tokio::test]
    async fn test_update_repository_keeps_old_entry_when_url_is_bad() {
        let mut executor = MockCommandExecutor::new();
        executor
            .expect_execute()
            .times(1)
            .returning(|_, _| {
                Err(BackendError::Command(
                    "looks like it is not a valid chart repository".to_string(),
                ))
            });

        let helm = HelmCli::with_executor(executor, "helm");
        assert!(
            helm.update_repository("old", "stable", "https://nope")
                .await
                .is_err()
        );
    }

    #[tokio::test]
    async fn test_install_writes_values_file() {
        let mut executor = MockCommandExecutor::new();
        executor
            .expect_execute()
            .withf(|_, args: &[String]| {
                let Some(pos) = args.iter().position(|a| a == "-f") else {
                    return false;
                };
                let contents = std::fs::read_to_string(&args[pos + 1]).unwrap_or_default();
                args[..6]
                    == [
                        "install",
                        "web",
                        "bitnami/nginx",
                        "--namespace",
                        "apps",
                        "--create-namespace",
                    ]
                    && contents == "replicaCount: 2\n"
            })
            .times(1)
            .returning(|_, _| Ok(String::new()));

        let helm = HelmCli::with_executor(executor, "helm");
        helm.install_chart(&InstallChartRequest {
            name: "web".to_string(),
            chart_name: "bitnami/nginx".to_string(),
            namespace: "apps".to_string(),
            values: Some("replicaCount: 2\n".to_string()),
        })
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn test_install_without_values_has_no_file_flag() {
        let mut executor = MockCommandExecutor::new();
        executor
            .expect_execute()
            .withf(|_, args: &[String]| !args.iter().any(|a| a == "-f"))
            .times(1)
            .returning(|_, _| Ok(String::new()));

        let helm = HelmCli::with_executor(executor, "helm");
        helm.install_chart(&InstallChartRequest {
            name: "web".to_string(),
            chart_name: "bitnami/nginx".to_string(),
            namespace: "apps".to_string(),
            values: None,
        })
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn test_chart_details_reads_chart_readme_and_values() {
        let mut executor = MockCommandExecutor::new();
        executor
            .expect_execute()
            .withf(args_are(&["show", "chart", "bitnami/nginx"]))
            .returning(|_, _| Ok("name: nginx\nversion: 15.0.0\n".to_string()));
        executor
            .expect_execute()
            .withf(args_are(&["show", "readme", "bitnami/nginx"]))
            .returning(|_, _| Ok("# NGINX".to_string()));
        executor
            .expect_execute()
            .withf(args_are(&["show", "values", "bitnami/nginx"]))
            .returning(|_, _| Ok("replicaCount: 1\n".to_string()));

        let helm = HelmCli::with_executor(executor, "helm");
        let details = helm.get_chart_details("bitnami/nginx").await.unwrap();
        assert_eq!(details.info.name, "nginx");
        assert_eq!(details.readme, "# NGINX");
        assert_eq!(details.values, "replicaCount: 1\n");
    }

    #[tokio::test]
    async fn test_bad_json_is_decode_error() {
        let mut executor = MockCommandExecutor::new();
        executor
            .expect_execute()
            .returning(|_, _| Ok("not json".to_string()));

        let helm = HelmCli::with_executor(executor, "helm");
        assert!(matches!(
            helm.find_charts_in_repo("").await,
            Err(BackendError::Decode(_))
        ));
    }
}
