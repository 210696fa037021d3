#[cfg(test)]
mod tests {
    use crate::logic::*;
    use bookline_common::models::ProfileUpdate;
    use reqwest::StatusCode;

    #[test]
    fn test_image_too_large_flattens_to_413_storable() {
        let err = SharetribeError::ImageTooLarge("portrait.jpg".to_string());
        let storable = err.to_storable();

        assert_eq!(storable.error_type, "upload-over-limit");
        assert_eq!(storable.status, Some(413));
        assert!(
            storable.is_payload_too_large(),
            "oversized upload must stay distinguishable after flattening"
        );
    }

    #[test]
    fn test_api_error_flattens_with_status() {
        let err = SharetribeError::ApiError {
            status: 409,
            message: "email already taken".to_string(),
        };
        let storable = err.to_storable();

        assert_eq!(storable.error_type, "api-error");
        assert_eq!(storable.status, Some(409));
        assert!(!storable.is_payload_too_large());
    }

    #[test]
    fn test_error_from_response_prefers_error_title() {
        let body = r#"{"errors":[{"status":403,"code":"forbidden","title":"Forbidden"}]}"#;
        let err = error_from_response(StatusCode::FORBIDDEN, body);

        match err {
            SharetribeError::ApiError { status, message } => {
                assert_eq!(status, 403);
                assert_eq!(message, "Forbidden");
            }
            other => panic!("expected ApiError, got {:?}", other),
        }
    }

    #[test]
    fn test_error_from_response_falls_back_to_raw_body() {
        let err = error_from_response(StatusCode::BAD_GATEWAY, "upstream exploded");

        match err {
            SharetribeError::ApiError { status, message } => {
                assert_eq!(status, 502);
                assert_eq!(message, "upstream exploded");
            }
            other => panic!("expected ApiError, got {:?}", other),
        }
    }

    #[test]
    fn test_image_envelope_maps_to_uploaded_image() {
        let body = r#"{
            "data": {
                "id": "img-1",
                "attributes": {
                    "variants": {
                        "square-small": {"url": "https://cdn.test/s.jpg", "width": 240, "height": 240},
                        "square-small2x": {"url": "https://cdn.test/s2x.jpg", "width": 480, "height": 480}
                    }
                }
            }
        }"#;
        let parsed: ImageUploadResponse = serde_json::from_str(body).unwrap();
        let image = parsed.data.into_uploaded_image();

        assert_eq!(image.id, "img-1");
        assert_eq!(image.variants.len(), 2);
        assert_eq!(image.variants[0].name, "square-small");
        assert_eq!(image.variants[0].width, 240);
        assert_eq!(image.variants[1].name, "square-small2x");
        assert_eq!(image.variants[1].url, "https://cdn.test/s2x.jpg");
    }

    #[test]
    fn test_user_envelope_maps_to_user_record() {
        let body = r#"{
            "data": {
                "id": "user-1",
                "attributes": {
                    "profile": {"firstName": "Ada", "lastName": "Lovelace", "displayName": "Ada L"},
                    "createdAt": "2025-05-01T10:00:00Z"
                },
                "relationships": {
                    "profileImage": {"data": {"id": "img-9"}}
                }
            }
        }"#;
        let parsed: CurrentUserResponse = serde_json::from_str(body).unwrap();
        let record = parsed.data.into_user_record();

        assert_eq!(record.id, "user-1");
        assert_eq!(record.first_name, "Ada");
        assert_eq!(record.display_name, Some("Ada L".to_string()));
        assert_eq!(record.bio, "", "absent bio should default to empty");
        assert_eq!(record.profile_image_id, Some("img-9".to_string()));
    }

    #[test]
    fn test_transaction_envelope_is_denormalized() {
        let body = r#"{
            "data": [
                {
                    "id": "tx-1",
                    "attributes": {
                        "processName": "default-booking/release-1",
                        "lastTransition": "transition/accept",
                        "lastTransitionedAt": "2025-05-02T09:00:00Z"
                    },
                    "relationships": {"listing": {"data": {"id": "listing-1"}}}
                },
                {
                    "id": "tx-2",
                    "attributes": {
                        "processName": "default-booking/release-1",
                        "lastTransition": "transition/accept",
                        "lastTransitionedAt": "2025-05-02T09:30:00Z"
                    },
                    "relationships": {"listing": {"data": {"id": "listing-missing"}}}
                }
            ],
            "included": [
                {
                    "type": "listing",
                    "id": "listing-1",
                    "attributes": {
                        "title": "Coaching session",
                        "availabilityPlan": {
                            "entries": [
                                {"dayOfWeek": "mon", "startTime": "09:00", "endTime": "10:00"}
                            ]
                        }
                    }
                }
            ]
        }"#;
        let parsed: TransactionQueryResponse = serde_json::from_str(body).unwrap();
        let transactions = parsed.into_transactions();

        assert_eq!(
            transactions.len(),
            1,
            "transaction without its listing include should be dropped"
        );
        let tx = &transactions[0];
        assert_eq!(tx.id, "tx-1");
        assert_eq!(tx.listing.title, "Coaching session");
        assert_eq!(tx.listing.availability_plan.len(), 1);
        assert_eq!(tx.listing.availability_plan[0].day_of_week, "mon");
    }

    #[test]
    fn test_update_profile_body_wire_format() {
        let update = ProfileUpdate {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            display_name: None,
            bio: "Mathematician".to_string(),
            profile_image_id: None,
        };
        let body = serde_json::to_value(UpdateProfileBody::from(&update)).unwrap();

        assert_eq!(body["firstName"], "Ada");
        assert!(
            body.get("displayName").is_some_and(|v| v.is_null()),
            "displayName should serialize as null to clear it"
        );
        assert!(
            body.get("profileImageId").is_none(),
            "profileImageId should be omitted when no upload is attached"
        );
    }
}
