//! Builder for `POST /servers/{server_id}/roles`.

use std::fmt;
use std::sync::Arc;

use parley_common::checks;
use parley_common::models::CreateRolePayload;
use parley_common::{ALL_PERMISSIONS, CheckError, Permissions};
use tokio::task::JoinHandle;

use crate::entities::{EntityBuilder, Role, Server};
use crate::error::{ParleyError, Result};
use crate::route::{self, CompiledRoute};
use crate::transport::{RestRequest, Transport};

type Check = Box<dyn Fn() -> bool + Send + Sync + 'static>;

/// Fluent builder that creates a role in one server.
///
/// Every field starts unset and is left out of the request, so the server
/// applies its own default. Permission masks are checked against the current
/// user's cached permissions as soon as they are set.
///
/// ```rust,no_run
/// # use std::sync::Arc;
/// # use parley_sdk::{ParleyClient, Permissions, Server};
/// # async fn demo(client: ParleyClient, server: Arc<Server>) -> parley_sdk::Result<()> {
/// let mut action = client.create_role(server);
/// action
///     .name("Moderators")
///     .color(0x3498db)
///     .hoisted(true)
///     .permission_flags(Permissions::KICK_MEMBERS | Permissions::MANAGE_MESSAGES)?
///     .reason("new mod team");
///
/// let role = action.execute().await?;
/// # Ok(())
/// # }
/// ```
pub struct RoleAction {
    transport: Arc<dyn Transport>,
    server: Arc<Server>,
    route: CompiledRoute,
    name: Option<String>,
    color: Option<i32>,
    permissions: Option<i64>,
    hoisted: Option<bool>,
    mentionable: Option<bool>,
    check: Option<Check>,
    reason: Option<String>,
}

impl RoleAction {
    pub fn new(transport: Arc<dyn Transport>, server: Arc<Server>) -> Self {
        let route = route::CREATE_ROLE.compile(&[&server.id.to_string()]);
        Self {
            transport,
            server,
            route,
            name: None,
            color: None,
            permissions: None,
            hoisted: None,
            mentionable: None,
            check: None,
            reason: None,
        }
    }

    pub fn server(&self) -> &Arc<Server> {
        &self.server
    }

    pub fn route(&self) -> &CompiledRoute {
        &self.route
    }

    pub fn name(&mut self, name: impl Into<String>) -> &mut Self {
        self.name = Some(name.into());
        self
    }

    pub fn clear_name(&mut self) -> &mut Self {
        self.name = None;
        self
    }

    /// Show members of this role separately from online members.
    pub fn hoisted(&mut self, hoisted: impl Into<Option<bool>>) -> &mut Self {
        self.hoisted = hoisted.into();
        self
    }

    pub fn mentionable(&mut self, mentionable: impl Into<Option<bool>>) -> &mut Self {
        self.mentionable = mentionable.into();
        self
    }

    /// RGB colour. Bits above the low 24 are dropped when the body is built.
    pub fn color(&mut self, rgb: impl Into<Option<i32>>) -> &mut Self {
        self.color = rgb.into();
        self
    }

    /// Raw permission mask for the new role; `None` clears it.
    ///
    /// Fails without touching the stored mask if the value is negative, above
    /// [`ALL_PERMISSIONS`], or contains a flag the current user lacks.
    pub fn permissions(
        &mut self,
        permissions: impl Into<Option<i64>>,
    ) -> std::result::Result<&mut Self, CheckError> {
        let permissions = permissions.into();
        if let Some(raw) = permissions {
            checks::not_negative(raw, "Raw permissions")?;
            checks::check(
                raw <= ALL_PERMISSIONS,
                "Provided permissions may not be greater than a full permission set",
            )?;
            for flag in Permissions::from_bits_truncate(raw).flags() {
                self.check_permission(flag)?;
            }
        }
        self.permissions = permissions;
        Ok(self)
    }

    pub fn permission_flags(
        &mut self,
        permissions: Permissions,
    ) -> std::result::Result<&mut Self, CheckError> {
        self.permissions(permissions.bits())
    }

    /// Evaluated right before sending; returning `false` skips the request.
    pub fn check(&mut self, check: impl Fn() -> bool + Send + Sync + 'static) -> &mut Self {
        self.check = Some(Box::new(check));
        self
    }

    /// Audit-log reason attached to the request.
    pub fn reason(&mut self, reason: impl Into<String>) -> &mut Self {
        self.reason = Some(reason.into());
        self
    }

    fn check_permission(&self, permission: Permissions) -> std::result::Result<(), CheckError> {
        if self.server.has_permission(permission) {
            Ok(())
        } else {
            Err(CheckError::InsufficientPermission { permission })
        }
    }

    /// The request body holding only the fields that were set.
    pub fn build_payload(&self) -> CreateRolePayload {
        CreateRolePayload {
            name: self.name.clone(),
            color: self.color.map(CreateRolePayload::mask_color),
            permissions: self.permissions,
            hoist: self.hoisted,
            mentionable: self.mentionable,
        }
    }

    /// Send the request and decode the created role.
    ///
    /// Resolves to `Ok(None)` without any network traffic when the
    /// [`check`](Self::check) returns `false`.
    pub async fn execute(self) -> Result<Option<Role>> {
        if let Some(check) = &self.check {
            if !check() {
                tracing::debug!(server_id = %self.server.id, "role creation skipped by check");
                return Ok(None);
            }
        }

        let body = serde_json::to_value(self.build_payload())?;
        let Self { transport, server, route, reason, .. } = self;

        tracing::debug!(server_id = %server.id, %route, "creating role");
        let request = RestRequest::new(route).with_body(body).with_reason(reason);
        let response = transport.execute(request).await?;

        let role = EntityBuilder::create_role(&server, response, server.id)?;
        tracing::debug!(server_id = %server.id, role_id = %role.id, "role created");
        Ok(Some(role))
    }

    /// Run [`execute`](Self::execute) on the tokio runtime and report through callbacks.
    ///
    /// Neither callback runs when the check declines the request.
    pub fn queue<S, F>(self, on_success: S, on_failure: F) -> JoinHandle<()>
    where
        S: FnOnce(Role) + Send + 'static,
        F: FnOnce(ParleyError) + Send + 'static,
    {
        tokio::spawn(async move {
            match self.execute().await {
                Ok(Some(role)) => on_success(role),
                Ok(None) => {}
                Err(e) => on_failure(e),
            }
        })
    }
}

impl fmt::Debug for RoleAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RoleAction")
            .field("server_id", &self.server.id)
            .field("name", &self.name)
            .field("color", &self.color)
            .field("permissions", &self.permissions)
            .field("hoisted", &self.hoisted)
            .field("mentionable", &self.mentionable)
            .field("has_check", &self.check.is_some())
            .field("reason", &self.reason)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use parley_common::Snowflake;
    use proptest::prelude::*;
    use serde_json::{Value, json};
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicBool, Ordering};

    /// Records every request and answers with a fixed reply.
    struct MockTransport {
        requests: Mutex<Vec<RestRequest>>,
        reply: std::result::Result<Value, (u16, String)>,
    }

    impl MockTransport {
        fn ok(body: Value) -> Arc<Self> {
            Arc::new(Self { requests: Mutex::new(Vec::new()), reply: Ok(body) })
        }

        fn failing(status: u16, message: &str) -> Arc<Self> {
            Arc::new(Self {
                requests: Mutex::new(Vec::new()),
                reply: Err((status, message.to_owned())),
            })
        }

        fn requests(&self) -> Vec<RestRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Transport for MockTransport {
        async fn execute(&self, request: RestRequest) -> Result<Value> {
            self.requests.lock().unwrap().push(request);
            match &self.reply {
                Ok(body) => Ok(body.clone()),
                Err((status, message)) => Err(ParleyError::Api {
                    status: *status,
                    code: None,
                    message: message.clone(),
                }),
            }
        }
    }

    fn server_with(perms: Permissions) -> Arc<Server> {
        Arc::new(Server::new(
            Snowflake::new(100),
            "Rustaceans",
            Snowflake::new(1),
            Snowflake::new(2),
            perms,
        ))
    }

    fn action_with(perms: Permissions) -> RoleAction {
        RoleAction::new(MockTransport::ok(json!({})), server_with(perms))
    }

    fn admins_body() -> Value {
        json!({
            "id": "555",
            "name": "Admins",
            "color": 0,
            "hoist": true,
            "position": 1,
            "permissions": "0",
            "managed": false,
            "mentionable": false
        })
    }

    #[test]
    fn test_no_setters_builds_empty_payload() {
        let action = action_with(Permissions::empty());
        let payload = action.build_payload();
        assert!(payload.is_empty());
        assert_eq!(serde_json::to_value(&payload).unwrap(), json!({}));
    }

    #[test]
    fn test_route_targets_server() {
        let action = action_with(Permissions::empty());
        assert_eq!(action.route().to_string(), "POST /servers/100/roles");
    }

    #[test]
    fn test_color_is_truncated_to_24_bits() {
        let mut action = action_with(Permissions::empty());
        action.color(0x1FF_FFFF);
        let body = serde_json::to_value(action.build_payload()).unwrap();
        assert_eq!(body, json!({ "color": 0xFF_FFFF }));
    }

    #[test]
    fn test_setters_can_unset() {
        let mut action = action_with(Permissions::all());
        action
            .name("Temp")
            .color(0x123456)
            .hoisted(false)
            .mentionable(true);
        action.permissions(Permissions::SPEAK.bits()).unwrap();
        assert_eq!(
            serde_json::to_value(action.build_payload()).unwrap(),
            json!({
                "name": "Temp",
                "color": 0x123456,
                "permissions": Permissions::SPEAK.bits(),
                "hoist": false,
                "mentionable": true
            })
        );

        action.clear_name().color(None).hoisted(None).mentionable(None);
        action.permissions(None).unwrap();
        assert!(action.build_payload().is_empty());
    }

    #[test]
    fn test_negative_mask_is_invalid() {
        let mut action = action_with(Permissions::all());
        let err = action.permissions(-1).unwrap_err();
        assert!(matches!(err, CheckError::InvalidArgument { .. }));
        assert_eq!(action.build_payload().permissions, None);
    }

    #[test]
    fn test_mask_above_all_is_invalid() {
        let mut action = action_with(Permissions::all());
        let err = action.permissions(ALL_PERMISSIONS + 1).unwrap_err();
        assert!(matches!(err, CheckError::InvalidArgument { .. }));
    }

    #[test]
    fn test_missing_flag_is_named() {
        let mut action = action_with(Permissions::MANAGE_ROLES | Permissions::KICK_MEMBERS);
        let mask = Permissions::KICK_MEMBERS | Permissions::BAN_MEMBERS;
        let err = action.permission_flags(mask).unwrap_err();
        assert_eq!(
            err,
            CheckError::InsufficientPermission { permission: Permissions::BAN_MEMBERS }
        );
        assert_eq!(err.to_string(), "Missing permission: BAN_MEMBERS");
    }

    #[test]
    fn test_failed_set_keeps_previous_mask() {
        let mut action = action_with(Permissions::MANAGE_ROLES | Permissions::KICK_MEMBERS);
        action.permission_flags(Permissions::KICK_MEMBERS).unwrap();

        assert!(action.permission_flags(Permissions::BAN_MEMBERS).is_err());
        assert!(action.permissions(-5).is_err());

        assert_eq!(
            action.build_payload().permissions,
            Some(Permissions::KICK_MEMBERS.bits())
        );
    }

    #[test]
    fn test_administrator_may_grant_anything() {
        let mut action = action_with(Permissions::ADMINISTRATOR);
        action.permissions(ALL_PERMISSIONS).unwrap();
        assert_eq!(action.build_payload().permissions, Some(ALL_PERMISSIONS));
    }

    #[tokio::test]
    async fn test_execute_end_to_end() {
        let transport = MockTransport::ok(admins_body());
        let server = server_with(Permissions::empty());

        let mut action = RoleAction::new(transport.clone(), Arc::clone(&server));
        action.name("Admins").hoisted(true);

        let role = action.execute().await.unwrap().expect("role should be created");

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].route.path, "/servers/100/roles");
        assert_eq!(requests[0].route.method, reqwest::Method::POST);
        assert_eq!(requests[0].body, Some(json!({ "name": "Admins", "hoist": true })));
        assert_eq!(requests[0].reason, None);

        assert_eq!(role.name, "Admins");
        assert_eq!(role.id, Snowflake::new(555));
        assert_eq!(role.server_id, server.id);
        assert!(Arc::ptr_eq(role.server(), &server));
    }

    #[tokio::test]
    async fn test_reason_is_forwarded() {
        let transport = MockTransport::ok(admins_body());
        let mut action = RoleAction::new(transport.clone(), server_with(Permissions::empty()));
        action.reason("audit me");

        action.execute().await.unwrap();
        assert_eq!(transport.requests()[0].reason.as_deref(), Some("audit me"));
    }

    #[tokio::test]
    async fn test_false_check_sends_nothing() {
        let transport = MockTransport::ok(admins_body());
        let mut action = RoleAction::new(transport.clone(), server_with(Permissions::empty()));
        action.name("Admins").check(|| false);

        assert!(action.execute().await.unwrap().is_none());
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn test_true_check_sends() {
        let transport = MockTransport::ok(admins_body());
        let mut action = RoleAction::new(transport.clone(), server_with(Permissions::empty()));
        action.check(|| true);

        assert!(action.execute().await.unwrap().is_some());
        assert_eq!(transport.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_remote_failure_propagates() {
        let transport = MockTransport::failing(403, "Missing Permissions");
        let action = RoleAction::new(transport.clone(), server_with(Permissions::empty()));

        let err = action.execute().await.unwrap_err();
        assert_eq!(err.status(), Some(403));
        assert_eq!(transport.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_queue_success_continuation() {
        let (tx, rx) = tokio::sync::oneshot::channel();
        let failed = Arc::new(AtomicBool::new(false));
        let failed_flag = Arc::clone(&failed);

        let mut action =
            RoleAction::new(MockTransport::ok(admins_body()), server_with(Permissions::empty()));
        action.name("Admins");
        action
            .queue(
                move |role| {
                    let _ = tx.send(role);
                },
                move |_| failed_flag.store(true, Ordering::SeqCst),
            )
            .await
            .unwrap();

        let role = rx.await.unwrap();
        assert_eq!(role.name, "Admins");
        assert!(!failed.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_queue_failure_continuation() {
        let (tx, rx) = tokio::sync::oneshot::channel();
        let action = RoleAction::new(
            MockTransport::failing(500, "boom"),
            server_with(Permissions::empty()),
        );

        action
            .queue(|_| panic!("should not succeed"), move |e| {
                let _ = tx.send(e);
            })
            .await
            .unwrap();

        let err = rx.await.unwrap();
        assert!(matches!(err, ParleyError::Api { status: 500, .. }));
    }

    #[tokio::test]
    async fn test_queue_skipped_fires_nothing() {
        let fired = Arc::new(AtomicBool::new(false));
        let (on_ok, on_err) = (Arc::clone(&fired), Arc::clone(&fired));

        let transport = MockTransport::ok(admins_body());
        let mut action = RoleAction::new(transport.clone(), server_with(Permissions::empty()));
        action.check(|| false);

        action
            .queue(
                move |_| on_ok.store(true, Ordering::SeqCst),
                move |_| on_err.store(true, Ordering::SeqCst),
            )
            .await
            .unwrap();

        assert!(!fired.load(Ordering::SeqCst));
        assert!(transport.requests().is_empty());
    }

    proptest! {
        #[test]
        fn prop_out_of_range_masks_are_rejected(
            mask in prop_oneof![i64::MIN..0_i64, (ALL_PERMISSIONS + 1)..=i64::MAX]
        ) {
            let mut action = action_with(Permissions::all());
            let result = action.permissions(mask).map(|_| ());
            prop_assert!(
                matches!(result, Err(CheckError::InvalidArgument { .. })),
                "unexpected result: {:?}",
                result
            );
            prop_assert_eq!(action.build_payload().permissions, None);
        }

        #[test]
        fn prop_held_masks_are_stored(
            held in 0..=ALL_PERMISSIONS,
            requested in 0..=ALL_PERMISSIONS,
        ) {
            let held = Permissions::from_bits_truncate(held).difference(Permissions::ADMINISTRATOR);
            let mask = Permissions::from_bits_truncate(requested) & held;

            let mut action = action_with(held);
            prop_assert!(action.permissions(mask.bits()).is_ok());
            prop_assert_eq!(action.build_payload().permissions, Some(mask.bits()));
        }

        #[test]
        fn prop_lowest_missing_flag_is_reported(
            held in 0..=ALL_PERMISSIONS,
            requested in 1..=ALL_PERMISSIONS,
        ) {
            let held = Permissions::from_bits_truncate(held).difference(Permissions::ADMINISTRATOR);
            let mask = Permissions::from_bits_truncate(requested);
            let missing = mask.difference(held);
            prop_assume!(!missing.is_empty());

            let mut action = action_with(held);
            let lowest = missing.flags().next().unwrap();
            prop_assert_eq!(
                action.permissions(mask.bits()).map(|_| ()),
                Err(CheckError::InsufficientPermission { permission: lowest })
            );
            prop_assert_eq!(action.build_payload().permissions, None);
        }
    }
}
