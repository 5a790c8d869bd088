//! # Extension Scenario Tests
//!
//! End-to-end behavior of the public API on realistic pipelines:
//! - Secret volumes and env vars (literal, pipeline input, upstream output)
//! - Mixing kinds on one task (secrets, PVC mounts, config maps)
//! - Several tasks sharing one component (executor labels owned by the caller)
//! - Failure paths leaving records untouched
//!
//! Expected fragments are written in YAML, as they appear in the compiled
//! pipeline's platform spec.

use platform_ext::{
    Channel, ErrorKind, ExtensionConfig, ExtensionKind, Extensions, FixSuggestion,
    HasPlatformConfig, ParameterReference, PipelineTask, SecretPolicy,
};
use pretty_assertions::assert_eq;
use serde_json::{json, Map, Value};

// ============================================================================
// TEST HELPERS
// ============================================================================

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn yaml(text: &str) -> Value {
    serde_yaml::from_str(text).unwrap()
}

fn stored(task: &PipelineTask) -> Value {
    task.platform_config()
        .get("kubernetes")
        .cloned()
        .unwrap_or(Value::Null)
}

/// Nest each task's record under its executor label, like the final
/// platform spec does
fn deployment_spec(executors: &[(&str, &PipelineTask)]) -> Value {
    let mut map = Map::new();
    for (label, task) in executors {
        map.insert(label.to_string(), stored(task));
    }
    json!({"platforms": {"kubernetes": {"deploymentSpec": {"executors": map}}}})
}

fn allow_upstream_secrets() -> Extensions {
    Extensions::new(&ExtensionConfig {
        secrets: SecretPolicy {
            allow_upstream_output: true,
        },
        ..ExtensionConfig::default()
    })
}

// ============================================================================
// SECRET AS VOLUME
// ============================================================================

mod secret_as_volume {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn use_one() {
        init_tracing();
        let ext = Extensions::default();
        let mut task = PipelineTask::new("comp");

        ext.use_secret_as_volume(&mut task, "secret-name", "/mnt/x", false)
            .unwrap();

        assert_eq!(
            stored(&task),
            yaml(
                r#"
secretAsVolume:
  - secretName: secret-name
    secretNameParameter:
      runtimeValue:
        constant: secret-name
    mountPath: /mnt/x
    optional: false
"#
            )
        );
    }

    #[test]
    fn use_two_in_call_order() {
        let ext = Extensions::default();
        let mut task = PipelineTask::new("comp");

        ext.use_secret_as_volume(&mut task, "secret-name1", "secretpath1", false)
            .unwrap();
        ext.use_secret_as_volume(&mut task, "secret-name2", "secretpath2", false)
            .unwrap();

        assert_eq!(
            stored(&task),
            yaml(
                r#"
secretAsVolume:
  - secretName: secret-name1
    secretNameParameter: {runtimeValue: {constant: secret-name1}}
    mountPath: secretpath1
    optional: false
  - secretName: secret-name2
    secretNameParameter: {runtimeValue: {constant: secret-name2}}
    mountPath: secretpath2
    optional: false
"#
            )
        );
    }

    #[test]
    fn pipeline_inputs_across_two_executors() {
        let ext = Extensions::default();
        let mut t1 = PipelineTask::new("comp");
        let mut t2 = PipelineTask::new("comp-2");

        let input_1 = Channel::pipeline_input("secret_name_input_1");
        let input_2 = Channel::pipeline_input("secret_name_input_2");

        ext.use_secret_as_volume(&mut t1, &input_1, "secretpath", false)
            .unwrap();
        ext.use_secret_as_volume(&mut t1, &input_2, "secretpath", false)
            .unwrap();
        ext.use_secret_as_volume(&mut t2, &input_2, "secretpath", false)
            .unwrap();

        assert_eq!(
            deployment_spec(&[("exec-comp", &t1), ("exec-comp-2", &t2)]),
            yaml(
                r#"
platforms:
  kubernetes:
    deploymentSpec:
      executors:
        exec-comp:
          secretAsVolume:
            - secretNameParameter: {componentInputParameter: secret_name_input_1}
              mountPath: secretpath
              optional: false
            - secretNameParameter: {componentInputParameter: secret_name_input_2}
              mountPath: secretpath
              optional: false
        exec-comp-2:
          secretAsVolume:
            - secretNameParameter: {componentInputParameter: secret_name_input_2}
              mountPath: secretpath
              optional: false
"#
            )
        );
    }

    #[test]
    fn upstream_outputs_when_allowed() {
        let ext = allow_upstream_secrets();
        let mut t1 = PipelineTask::new("comp");
        let mut t4 = PipelineTask::new("comp-2");

        let output_1 = Channel::task_output("comp-with-output", "Output");
        let output_2 = Channel::task_output("comp-with-output-2", "Output");

        ext.use_secret_as_volume(&mut t1, &output_1, "secretpath", false)
            .unwrap();
        ext.use_secret_as_volume(&mut t1, &output_2, "secretpath", false)
            .unwrap();
        ext.use_secret_as_volume(&mut t4, &output_1, "secretpath", false)
            .unwrap();

        assert_eq!(
            deployment_spec(&[("exec-comp", &t1), ("exec-comp-2", &t4)]),
            yaml(
                r#"
platforms:
  kubernetes:
    deploymentSpec:
      executors:
        exec-comp:
          secretAsVolume:
            - secretNameParameter:
                taskOutputParameter: {producerTask: comp-with-output, outputParameterKey: Output}
              mountPath: secretpath
              optional: false
            - secretNameParameter:
                taskOutputParameter: {producerTask: comp-with-output-2, outputParameterKey: Output}
              mountPath: secretpath
              optional: false
        exec-comp-2:
          secretAsVolume:
            - secretNameParameter:
                taskOutputParameter: {producerTask: comp-with-output, outputParameterKey: Output}
              mountPath: secretpath
              optional: false
"#
            )
        );
    }

    #[test]
    fn upstream_output_rejected_by_default() {
        let ext = Extensions::default();
        let mut task = PipelineTask::new("comp");
        ext.use_secret_as_volume(&mut task, "kept", "/kept", false).unwrap();
        let before = stored(&task);

        let producer = Channel::task_output("producer", "Output");
        let err = ext
            .use_secret_as_volume(&mut task, producer, "/x", false)
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::ReferenceKind);
        assert!(err.to_string().contains("producer"));
        assert!(err.fix_suggestion().is_some());
        assert_eq!(stored(&task), before);
    }
}

// ============================================================================
// SECRET AS ENV
// ============================================================================

mod secret_as_env {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn pipeline_input_has_no_literal_name() {
        let ext = Extensions::default();
        let mut task = PipelineTask::new("comp");

        ext.use_secret_as_env(&mut task, Channel::pipeline_input("name1"), [("password", "PWD")])
            .unwrap();

        assert_eq!(
            stored(&task),
            yaml(
                r#"
secretAsEnv:
  - secretNameParameter: {componentInputParameter: name1}
    keyToEnv:
      - secretKey: password
        envVar: PWD
"#
            )
        );
    }

    #[test]
    fn upstream_output_when_allowed() {
        let ext = allow_upstream_secrets();
        let mut task = PipelineTask::new("comp");

        let producer = Channel::task_output("producer", "Output");
        ext.use_secret_as_env(&mut task, producer, [("foo", "CM_VAR")])
            .unwrap();

        let record = ext.record(&task).unwrap();
        assert_eq!(
            record.secret_as_env()[0].secret_name_parameter,
            ParameterReference::UpstreamOutput {
                producer_task: "producer".to_string(),
                output_key: "Output".to_string(),
            }
        );
        assert_eq!(
            stored(&task)["secretAsEnv"][0]["secretNameParameter"],
            json!({
                "taskOutputParameter": {"producerTask": "producer", "outputParameterKey": "Output"}
            })
        );
    }

    #[test]
    fn use_two_with_multi_key_mappings() {
        let ext = Extensions::default();
        let mut task = PipelineTask::new("comp");

        ext.use_secret_as_env(
            &mut task,
            "secret-name1",
            [("password1", "SECRET_VAR1"), ("username1", "USERNAME1")],
        )
        .unwrap();
        ext.use_secret_as_env(
            &mut task,
            "secret-name2",
            vec![("password2".to_string(), "SECRET_VAR2".to_string())],
        )
        .unwrap();

        assert_eq!(
            stored(&task),
            yaml(
                r#"
secretAsEnv:
  - secretName: secret-name1
    secretNameParameter: {runtimeValue: {constant: secret-name1}}
    keyToEnv:
      - {secretKey: password1, envVar: SECRET_VAR1}
      - {secretKey: username1, envVar: USERNAME1}
  - secretName: secret-name2
    secretNameParameter: {runtimeValue: {constant: secret-name2}}
    keyToEnv:
      - {secretKey: password2, envVar: SECRET_VAR2}
"#
            )
        );
    }

    #[test]
    fn non_string_name_is_type_error() {
        let ext = Extensions::default();
        let mut task = PipelineTask::new("comp");

        let err = ext
            .use_secret_as_env(&mut task, json!({"name": "s"}), [("k", "V")])
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Type);
        assert!(err.to_string().contains("object"));
        assert!(task.platform_config().is_empty());
    }
}

// ============================================================================
// MIXED KINDS ON ONE TASK
// ============================================================================

mod mixed_kinds {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn secret_volume_preserves_secret_env() {
        let ext = Extensions::default();
        let mut task = PipelineTask::new("comp");

        ext.use_secret_as_env(&mut task, "secret-name1", [("password", "SECRET_VAR")])
            .unwrap();
        ext.use_secret_as_volume(&mut task, "secret-name2", "secretpath2", false)
            .unwrap();

        assert_eq!(
            stored(&task),
            yaml(
                r#"
secretAsEnv:
  - secretName: secret-name1
    secretNameParameter: {runtimeValue: {constant: secret-name1}}
    keyToEnv: [{secretKey: password, envVar: SECRET_VAR}]
secretAsVolume:
  - secretName: secret-name2
    secretNameParameter: {runtimeValue: {constant: secret-name2}}
    mountPath: secretpath2
    optional: false
"#
            )
        );
    }

    #[test]
    fn secret_volume_alongside_pvc_mount() {
        let ext = Extensions::default();
        let mut task = PipelineTask::new("comp");

        ext.mount_pvc(&mut task, "pvc-name", "path").unwrap();
        ext.use_secret_as_volume(&mut task, "secret-name", "secretpath", false)
            .unwrap();

        assert_eq!(
            stored(&task),
            yaml(
                r#"
pvcMount:
  - constant: pvc-name
    pvcNameParameter: {runtimeValue: {constant: pvc-name}}
    mountPath: path
secretAsVolume:
  - secretName: secret-name
    secretNameParameter: {runtimeValue: {constant: secret-name}}
    mountPath: secretpath
    optional: false
"#
            )
        );
    }

    #[test]
    fn every_kind_on_one_task() {
        let ext = Extensions::default();
        let mut task = PipelineTask::new("comp");

        ext.use_secret_as_env(&mut task, "s-env", [("k", "K")])
            .and_then(|t| ext.use_secret_as_volume(t, "s-vol", "/secret", true))
            .and_then(|t| ext.mount_pvc(t, Channel::task_output("createpvc", "name"), "/data"))
            .and_then(|t| ext.use_config_map_as_env(t, "cm-env", [("c", "C")]))
            .and_then(|t| ext.use_config_map_as_volume(t, "cm-vol", "/cm", false))
            .and_then(|t| ext.set_image_pull_secrets(t, ["regcred"]))
            .unwrap();

        let record = ext.record(&task).unwrap();
        for kind in ExtensionKind::ALL {
            assert_eq!(record.len(kind), 1, "{kind}");
        }
        assert!(record.extra().is_empty());
    }

    #[test]
    fn foreign_fields_survive_operations() {
        let ext = Extensions::default();
        let mut task = PipelineTask::new("comp");
        task.platform_config_mut().insert(
            "kubernetes".to_string(),
            yaml(
                r#"
nodeSelector:
  labels: {disk: ssd}
tolerations:
  - {key: gpu, operator: Exists, effect: NoSchedule}
"#,
            ),
        );

        ext.use_secret_as_volume(&mut task, "secret-name", "/mnt/x", false)
            .unwrap();

        let value = stored(&task);
        assert_eq!(value["nodeSelector"], json!({"labels": {"disk": "ssd"}}));
        assert_eq!(value["tolerations"][0]["key"], json!("gpu"));
        assert_eq!(value["secretAsVolume"][0]["secretName"], json!("secret-name"));
    }

    #[test]
    fn append_keeps_stored_bytes() {
        let ext = Extensions::default();
        let mut task = PipelineTask::new("comp");
        let stored_before = concat!(
            r#"{"nodeSelector":{"labels":{"disk":"ssd"}},"#,
            r#""secretAsEnv":[],"#,
            r#""secretAsVolume":[{"mountPath":"/x","#,
            r#""secretNameParameter":{"runtimeValue":{"constant":5}}},"#,
            r#"{"secretNameParameter":{"taskOutputParameter":"#,
            r#"{"producerTask":"p","outputParameterKey":"o","future":1}},"mountPath":"/y"}]}"#
        );
        task.platform_config_mut().insert(
            "kubernetes".to_string(),
            serde_json::from_str(stored_before).unwrap(),
        );

        ext.use_secret_as_volume(&mut task, "s", "/s", false)
            .unwrap();

        let expected = concat!(
            r#"{"nodeSelector":{"labels":{"disk":"ssd"}},"#,
            r#""secretAsEnv":[],"#,
            r#""secretAsVolume":[{"mountPath":"/x","#,
            r#""secretNameParameter":{"runtimeValue":{"constant":5}}},"#,
            r#"{"secretNameParameter":{"taskOutputParameter":"#,
            r#"{"producerTask":"p","outputParameterKey":"o","future":1}},"mountPath":"/y"},"#,
            r#"{"secretName":"s","secretNameParameter":{"runtimeValue":{"constant":"s"}},"#,
            r#""mountPath":"/s","optional":false}]}"#
        );
        assert_eq!(serde_json::to_string(&stored(&task)).unwrap(), expected);
    }

    #[test]
    fn identical_calls_give_identical_bytes() {
        fn build() -> String {
            let ext = Extensions::default();
            let mut task = PipelineTask::new("comp");
            ext.use_secret_as_env(&mut task, "s", [("b", "B"), ("a", "A"), ("c", "C")])
                .unwrap();
            ext.mount_pvc(&mut task, Channel::pipeline_input("pvc"), "/data")
                .unwrap();
            ext.use_secret_as_volume(&mut task, "v", "/v", false).unwrap();
            serde_json::to_string(&stored(&task)).unwrap()
        }

        assert_eq!(build(), build());
    }
}

// ============================================================================
// CONFIGURATION
// ============================================================================

mod configuration {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn custom_platform_key() {
        let config = ExtensionConfig::from_toml_str("platform = \"edge\"").unwrap();
        let ext = Extensions::new(&config);
        let mut task = PipelineTask::new("comp");

        ext.use_secret_as_volume(&mut task, "s", "/s", false).unwrap();

        assert!(task.platform_config().get("kubernetes").is_none());
        assert_eq!(task.platform_config()["edge"]["secretAsVolume"][0]["secretName"], json!("s"));
    }

    #[test]
    fn config_file_enables_upstream_secret_names() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("platform-ext.toml");
        std::fs::write(&path, "[secrets]\nallow_upstream_output = true\n").unwrap();

        let ext = Extensions::new(&ExtensionConfig::load(&path).unwrap());
        let mut task = PipelineTask::new("comp");

        ext.use_secret_as_volume(&mut task, Channel::task_output("producer", "Output"), "/s", false)
            .unwrap();
        assert!(ext.record(&task).unwrap().secret_as_volume()[0]
            .secret_name_parameter
            .is_upstream_output());
    }
}
