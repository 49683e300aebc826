use super::UserRole;

/// Input for creating a user. The password is already hashed and the QR
/// token already generated by the identity service.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: UserRole,
    pub qr_token: String,
}
