use super::*;

#[test]
fn transcript_upload_accepts_json_only() {
    let upload =
        TranscriptUpload::new("call.json", "application/json", b"{}".to_vec()).expect("valid");
    assert_eq!(upload.file().mime_type, "application/json");
    assert_eq!(upload.file().file_name, "call.json");

    let err = TranscriptUpload::new("call.txt", "text/plain", b"hi".to_vec()).unwrap_err();
    assert_eq!(
        err,
        ValidationError::UnexpectedType {
            expected: "application/json",
            actual: "text/plain".into(),
        }
    );
}

#[test]
fn video_upload_accepts_mp4_only() {
    assert!(VideoUpload::new("call.mp4", "video/mp4", vec![0, 0, 0, 24]).is_ok());
    assert!(VideoUpload::new("call.mov", "video/quicktime", vec![1]).is_err());
    assert!(VideoUpload::new("call.json", "application/json", vec![1]).is_err());
}

#[test]
fn declared_type_match_ignores_case_and_padding() {
    assert!(VideoUpload::new("call.mp4", " Video/MP4 ", vec![1]).is_ok());
}

#[test]
fn rejects_empty_names_and_payloads() {
    assert_eq!(
        TranscriptUpload::new(" ", "application/json", b"{}".to_vec()).unwrap_err(),
        ValidationError::MissingFileName
    );
    assert_eq!(
        VideoUpload::new("call.mp4", "video/mp4", Vec::new()).unwrap_err(),
        ValidationError::EmptyFile {
            file_name: "call.mp4".into()
        }
    );
}
