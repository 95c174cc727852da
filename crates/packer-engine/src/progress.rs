use crate::error::EngineError;
use bollard::models::BuildInfo;
use std::io::Write;

/// Print one build progress message.
///
/// Build step output is passed through verbatim, status lines (pulls,
/// pushes) get their own line. An error carried in the stream ends the
/// build with [`EngineError::BuildFailed`].
pub fn print(info: &BuildInfo, out: &mut impl Write) -> Result<(), EngineError> {
    if let Some(stream) = &info.stream {
        write!(out, "{stream}").map_err(|e| EngineError::Output { source: e })?;
    }

    if let Some(detail) = &info.error_detail {
        let message = detail
            .message
            .as_deref()
            .or(info.error.as_deref())
            .map_or("unknown build error", |m| m);
        return Err(EngineError::BuildFailed(message.to_owned()));
    }

    if let Some(error) = &info.error {
        return Err(EngineError::BuildFailed(error.clone()));
    }

    if let Some(status) = &info.status {
        writeln!(out, "{status}").map_err(|e| EngineError::Output { source: e })?;
    }

    if let Some(id) = info.aux.as_ref().and_then(|aux| aux.id.as_deref()) {
        tracing::info!(image_id = %id, "image built");
    }

    out.flush().map_err(|e| EngineError::Output { source: e })
}

#[cfg(test)]
mod tests {
    use super::*;
    use bollard::models::ErrorDetail;

    fn printed(info: &BuildInfo) -> (Result<(), EngineError>, String) {
        let mut out = Vec::new();
        let result = print(info, &mut out);
        (result, String::from_utf8(out).unwrap())
    }

    #[test]
    fn stream_output_is_passed_through() {
        let info = BuildInfo {
            stream: Some("Step 1/10 : FROM python AS builder\n".to_owned()),
            ..Default::default()
        };

        let (result, out) = printed(&info);

        assert!(result.is_ok());
        assert_eq!(out, "Step 1/10 : FROM python AS builder\n");
    }

    #[test]
    fn status_gets_its_own_line() {
        let info = BuildInfo {
            status: Some("Pulling from library/python".to_owned()),
            ..Default::default()
        };

        let (result, out) = printed(&info);

        assert!(result.is_ok());
        assert_eq!(out, "Pulling from library/python\n");
    }

    #[test]
    fn error_detail_fails_build() {
        let info = BuildInfo {
            error_detail: Some(ErrorDetail {
                code: Some(1),
                message: Some("The command '/bin/sh -c pipreqs .' returned a non-zero code: 1".to_owned()),
            }),
            ..Default::default()
        };

        let (result, _) = printed(&info);

        match result {
            Err(EngineError::BuildFailed(msg)) => assert!(msg.contains("pipreqs"), "got: {msg}"),
            other => panic!("expected BuildFailed, got {other:?}"),
        }
    }

    #[test]
    fn error_detail_without_message_uses_error_field() {
        let info = BuildInfo {
            error: Some("no space left on device".to_owned()),
            error_detail: Some(ErrorDetail {
                code: None,
                message: None,
            }),
            ..Default::default()
        };

        let (result, _) = printed(&info);

        assert!(matches!(result, Err(EngineError::BuildFailed(m)) if m == "no space left on device"));
    }

    #[test]
    fn empty_error_detail_still_fails_build() {
        let info = BuildInfo {
            error_detail: Some(ErrorDetail::default()),
            ..Default::default()
        };

        let (result, _) = printed(&info);

        assert!(matches!(result, Err(EngineError::BuildFailed(m)) if m == "unknown build error"));
    }

    #[test]
    fn bare_error_fails_build() {
        let info = BuildInfo {
            error: Some("pull access denied".to_owned()),
            ..Default::default()
        };

        let (result, _) = printed(&info);

        assert!(matches!(result, Err(EngineError::BuildFailed(m)) if m == "pull access denied"));
    }

    #[test]
    fn output_before_error_is_still_printed() {
        let info = BuildInfo {
            stream: Some("Step 5/10 : RUN pipreqs .\n".to_owned()),
            error: Some("boom".to_owned()),
            ..Default::default()
        };

        let (result, out) = printed(&info);

        assert!(result.is_err());
        assert_eq!(out, "Step 5/10 : RUN pipreqs .\n");
    }

    #[test]
    fn empty_message_prints_nothing() {
        let (result, out) = printed(&BuildInfo::default());

        assert!(result.is_ok());
        assert!(out.is_empty());
    }
}
