//! Hierarchy engine tests: file operations.

mod common;

use bytes::Bytes;
use common::{Harness, admin, alice, bob, collect_stream};
use drivebox_core::error::ErrorKind;
use drivebox_database::store::FileStore;
use drivebox_entity::file::CreateFile;
use drivebox_service::{FolderRef, UploadParams};

#[tokio::test]
async fn test_upload_into_folder_stamps_parent_path() {
    let h = Harness::new();
    let docs = h.mkdir(&alice(), "Docs", None).await;
    let year = h.mkdir(&alice(), "2024", Some(docs.id)).await;

    let file = h
        .put_file(&alice(), "report.pdf", Some(year.id), b"0123456789")
        .await;

    assert_eq!(file.path, "/Docs/2024/");
    assert_eq!(file.folder_id, Some(year.id));
    assert_eq!(file.size, 10);
    assert_eq!(file.owner.as_deref(), Some("alice"));
    assert!(h.blobs.contains(&file.object_key).await);
}

#[tokio::test]
async fn test_upload_to_root_level() {
    let h = Harness::new();
    let file = h.put_file(&alice(), "todo.txt", None, b"x").await;
    assert_eq!(file.path, "/");
    assert_eq!(file.folder_id, None);
}

#[tokio::test]
async fn test_upload_object_keys_are_unique_per_blob() {
    let h = Harness::new();
    let a = h.put_file(&alice(), "same.txt", None, b"one").await;
    let b = h.put_file(&alice(), "same.txt", None, b"two").await;
    assert_ne!(a.object_key, b.object_key);
    assert!(a.object_key.ends_with("-same.txt"));
}

#[tokio::test]
async fn test_upload_to_missing_or_foreign_folder_is_not_found() {
    let h = Harness::new();
    let bobs = h.mkdir(&bob(), "Private", None).await;

    let err = h
        .upload_service
        .upload(
            &alice(),
            UploadParams {
                filename: "x.txt".to_string(),
                content_type: None,
                folder_id: Some(bobs.id),
                data: Bytes::from_static(b"x"),
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);
    assert!(h.blobs.is_empty().await);
}

#[tokio::test]
async fn test_upload_size_limit_leaves_no_trace() {
    let h = Harness::with_max_upload(16);

    let err = h
        .upload_service
        .upload(
            &alice(),
            UploadParams {
                filename: "big.bin".to_string(),
                content_type: None,
                folder_id: None,
                data: Bytes::from(vec![0u8; 17]),
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);

    assert!(h.blobs.is_empty().await);
    let files = h.file_service.list_files(&admin(), None, None).await.unwrap();
    assert!(files.is_empty());
}

#[tokio::test]
async fn test_upload_validates_filename() {
    let h = Harness::new();
    for bad in ["", "  ", "a|b.txt", "a/b.txt"] {
        let err = h
            .upload_service
            .upload(
                &alice(),
                UploadParams {
                    filename: bad.to_string(),
                    content_type: None,
                    folder_id: None,
                    data: Bytes::from_static(b"x"),
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation, "filename {bad:?}");
    }
}

#[tokio::test]
async fn test_upload_defaults_content_type() {
    let h = Harness::new();
    let file = h
        .upload_service
        .upload(
            &alice(),
            UploadParams {
                filename: "mystery".to_string(),
                content_type: None,
                folder_id: None,
                data: Bytes::from_static(b"x"),
            },
        )
        .await
        .unwrap();
    assert_eq!(file.content_type, "application/octet-stream");
}

#[tokio::test]
async fn test_list_files_folder_scopes() {
    let h = Harness::new();
    let docs = h.mkdir(&alice(), "Docs", None).await;
    h.put_file(&alice(), "rooted.txt", None, b"r").await;
    h.put_file(&alice(), "inside.txt", Some(docs.id), b"i").await;

    let everywhere = h.file_service.list_files(&alice(), None, None).await.unwrap();
    assert_eq!(everywhere.len(), 2);

    let rooted = h
        .file_service
        .list_files(&alice(), Some(FolderRef::Root), None)
        .await
        .unwrap();
    assert_eq!(rooted.len(), 1);
    assert_eq!(rooted[0].filename, "rooted.txt");

    let inside = h
        .file_service
        .list_files(&alice(), Some(FolderRef::Folder(docs.id)), None)
        .await
        .unwrap();
    assert_eq!(inside.len(), 1);
    assert_eq!(inside[0].filename, "inside.txt");
}

#[tokio::test]
async fn test_list_files_search_is_case_insensitive_substring() {
    let h = Harness::new();
    h.put_file(&alice(), "Annual Report.pdf", None, b"1").await;
    h.put_file(&alice(), "notes.txt", None, b"2").await;

    let hits = h
        .file_service
        .list_files(&alice(), None, Some("report"))
        .await
        .unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].filename, "Annual Report.pdf");

    let none = h
        .file_service
        .list_files(&alice(), None, Some("missing"))
        .await
        .unwrap();
    assert!(none.is_empty());
}

#[tokio::test]
async fn test_list_files_owner_filtered_admin_unfiltered() {
    let h = Harness::new();
    h.put_file(&alice(), "a.txt", None, b"a").await;
    h.put_file(&bob(), "b.txt", None, b"b").await;

    let alices = h.file_service.list_files(&alice(), None, None).await.unwrap();
    assert_eq!(alices.len(), 1);

    let all = h.file_service.list_files(&admin(), None, None).await.unwrap();
    assert_eq!(all.len(), 2);
}

#[tokio::test]
async fn test_get_file_ownership_isolation() {
    let h = Harness::new();
    let file = h.put_file(&alice(), "secret.txt", None, b"s").await;

    assert!(h.file_service.get_file(&alice(), file.id).await.is_ok());
    assert!(h.file_service.get_file(&admin(), file.id).await.is_ok());

    let err = h.file_service.get_file(&bob(), file.id).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);
}

#[tokio::test]
async fn test_rename_file() {
    let h = Harness::new();
    let file = h.put_file(&alice(), "draft.txt", None, b"d").await;

    let renamed = h
        .file_service
        .rename_file(&alice(), file.id, "final.txt")
        .await
        .unwrap();
    assert_eq!(renamed.filename, "final.txt");

    let err = h
        .file_service
        .rename_file(&alice(), file.id, "bad|name")
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);

    let err = h
        .file_service
        .rename_file(&bob(), file.id, "mine.txt")
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);
}

#[tokio::test]
async fn test_delete_file_removes_blob_and_row() {
    let h = Harness::new();
    let file = h.put_file(&alice(), "gone.txt", None, b"g").await;

    h.file_service.delete_file(&alice(), file.id).await.unwrap();

    assert!(h.files.find_by_id(file.id).await.unwrap().is_none());
    assert!(!h.blobs.contains(&file.object_key).await);
}

#[tokio::test]
async fn test_delete_file_blob_failure_keeps_row() {
    let h = Harness::with_failing_keys(&["stuck.txt"]);
    let file = h.put_file(&alice(), "stuck.txt", None, b"s").await;

    let err = h
        .file_service
        .delete_file(&alice(), file.id)
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Storage);

    // Row intact so a retry can still reach the blob through it.
    assert!(h.files.find_by_id(file.id).await.unwrap().is_some());
    assert!(h.blobs.contains(&file.object_key).await);
}

#[tokio::test]
async fn test_move_file_between_folders_and_root() {
    let h = Harness::new();
    let docs = h.mkdir(&alice(), "Docs", None).await;
    let file = h.put_file(&alice(), "report.pdf", None, b"r").await;

    let moved = h
        .file_service
        .move_file(&alice(), file.id, Some(docs.id))
        .await
        .unwrap();
    assert_eq!(moved.folder_id, Some(docs.id));
    assert_eq!(moved.path, "/Docs/");

    let back = h
        .file_service
        .move_file(&alice(), file.id, None)
        .await
        .unwrap();
    assert_eq!(back.folder_id, None);
    assert_eq!(back.path, "/");
}

#[tokio::test]
async fn test_move_file_to_foreign_folder_is_not_found() {
    let h = Harness::new();
    let bobs = h.mkdir(&bob(), "Private", None).await;
    let file = h.put_file(&alice(), "report.pdf", None, b"r").await;

    let err = h
        .file_service
        .move_file(&alice(), file.id, Some(bobs.id))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);

    let unchanged = h.files.find_by_id(file.id).await.unwrap().unwrap();
    assert_eq!(unchanged.path, "/");
}

#[tokio::test]
async fn test_copy_file_produces_independent_blob() {
    let h = Harness::new();
    let docs = h.mkdir(&alice(), "Docs", None).await;
    let original = h.put_file(&alice(), "report.pdf", None, b"payload").await;

    let copy = h
        .file_service
        .copy_file(&alice(), original.id, Some(docs.id))
        .await
        .unwrap();

    assert_ne!(copy.id, original.id);
    assert_ne!(copy.object_key, original.object_key);
    assert_eq!(copy.filename, "report.pdf");
    assert_eq!(copy.size, original.size);
    assert_eq!(copy.path, "/Docs/");

    // Deleting the original leaves the copy readable.
    h.file_service
        .delete_file(&alice(), original.id)
        .await
        .unwrap();
    let download = h
        .download_service
        .download(&alice(), copy.id)
        .await
        .unwrap();
    assert_eq!(collect_stream(download.stream).await, b"payload");
}

#[tokio::test]
async fn test_copy_file_to_missing_destination_leaves_nothing() {
    let h = Harness::new();
    let original = h.put_file(&alice(), "report.pdf", None, b"payload").await;
    let blob_count = h.blobs.len().await;

    let err = h
        .file_service
        .copy_file(&alice(), original.id, Some(drivebox_core::types::FolderId::new()))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);

    assert_eq!(h.blobs.len().await, blob_count);
    let files = h.file_service.list_files(&alice(), None, None).await.unwrap();
    assert_eq!(files.len(), 1);
}

#[tokio::test]
async fn test_download_streams_content() {
    let h = Harness::new();
    let payload: Vec<u8> = (0..100_000u32).map(|i| (i % 251) as u8).collect();
    let file = h.put_file(&alice(), "blob.bin", None, &payload).await;

    let result = h.download_service.download(&alice(), file.id).await.unwrap();
    assert_eq!(result.file.id, file.id);
    assert_eq!(collect_stream(result.stream).await, payload);
}

#[tokio::test]
async fn test_download_enforces_ownership() {
    let h = Harness::new();
    let file = h.put_file(&alice(), "secret.txt", None, b"s").await;

    let err = h
        .download_service
        .download(&bob(), file.id)
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);
}

#[tokio::test]
async fn test_download_with_missing_blob_is_internal_error() {
    let h = Harness::new();

    // A row pointing at a blob that was never stored is an inconsistency,
    // not a NotFound.
    let orphan = h
        .files
        .insert(&CreateFile {
            filename: "ghost.txt".to_string(),
            size: 5,
            content_type: "text/plain".to_string(),
            object_key: "missing-key".to_string(),
            folder_id: None,
            path: "/".to_string(),
            owner: Some("alice".to_string()),
        })
        .await
        .unwrap();

    let err = h
        .download_service
        .download(&alice(), orphan.id)
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Internal);
}
