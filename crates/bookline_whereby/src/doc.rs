// --- File: crates/bookline_whereby/src/doc.rs ---

#![allow(dead_code)]
#![cfg(feature = "openapi")]
use utoipa::OpenApi;

use crate::handlers::{CreateMeetingRequest, CreateMeetingResponse, RoomUrlResponse};
use crate::logic::{WebhookEvent, WebhookEventData};

#[utoipa::path(
    post,
    path = "/video/meetings",
    request_body(content = CreateMeetingRequest, example = json!({
        "duration_minutes": 30
    })),
    responses(
        (status = 200, description = "Meeting created", body = CreateMeetingResponse,
         example = json!({
             "meeting_id": "88255226",
             "room_name": "/bookline-5bb73a5d",
             "room_url": "https://bookline.whereby.com/bookline-5bb73a5d",
             "host_room_url": "https://bookline.whereby.com/bookline-5bb73a5d?roomKey=eyJhb...",
             "start_date": "2025-05-05T10:30:00Z",
             "end_date": "2025-05-05T11:00:00Z"
         })
        ),
        (status = 400, description = "Non-positive duration"),
        (status = 502, description = "Video provider unreachable or returned an error"),
        (status = 503, description = "Whereby service disabled")
    )
)]
fn doc_create_meeting_handler() {}

#[utoipa::path(
    get,
    path = "/video/rooms/{room_name}",
    params(
        ("room_name" = String, Path, description = "Room name, with or without its leading slash", example = "bookline-5bb73a5d")
    ),
    responses(
        (status = 200, description = "Room URL resolved", body = RoomUrlResponse),
        (status = 503, description = "Whereby service disabled")
    )
)]
fn doc_get_room_url_handler() {}

#[utoipa::path(
    post,
    path = "/video/webhook",
    request_body(content = WebhookEvent, example = json!({
        "id": "d7a5f0c9",
        "apiVersion": "1.0",
        "type": "room.client.joined",
        "createdAt": "2025-05-05T10:31:02.520Z",
        "data": { "roomName": "/bookline-5bb73a5d", "numClients": 2 }
    })),
    responses(
        (status = 200, description = "Webhook received and acknowledged",
         example = json!({ "status": "received", "id": "d7a5f0c9" })
        ),
        (status = 400, description = "Invalid signature or payload"),
        (status = 503, description = "Whereby service disabled")
    )
)]
fn doc_whereby_webhook_handler() {}

#[derive(OpenApi)]
#[openapi(
    paths(
        doc_create_meeting_handler,
        doc_get_room_url_handler,
        doc_whereby_webhook_handler
    ),
    components(
        schemas(
            CreateMeetingRequest,
            CreateMeetingResponse,
            RoomUrlResponse,
            WebhookEvent,
            WebhookEventData
        )
    ),
    tags(
        (name = "video", description = "Whereby video meeting API")
    ),
    servers(
        (url = "/api", description = "Video API server")
    )
)]
pub struct WherebyApiDoc;
