//! JWT 令牌服务
//!
//! 处理 JWT 令牌的生成、验证和解析。

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use ring::rand::{SecureRandom, SystemRandom};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// JWT 配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtConfig {
    /// JWT 密钥 (应至少 32 字节)
    pub secret: String,
    /// 令牌过期时间 (分钟)
    pub expiration_minutes: i64,
    /// 令牌签发者
    pub issuer: String,
    /// 令牌受众
    pub audience: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        let secret = match load_jwt_secret() {
            Ok(key) => String::from_utf8(key).unwrap_or_else(|_| {
                tracing::error!("JWT secret contains invalid UTF-8 characters");
                generate_secure_printable_jwt_secret()
            }),
            Err(e) => {
                #[cfg(debug_assertions)]
                {
                    tracing::warn!("JWT configuration error: {}, using generated key", e);
                    generate_secure_printable_jwt_secret()
                }
                #[cfg(not(debug_assertions))]
                {
                    panic!("FATAL: JWT_SECRET configuration failed: {}", e);
                }
            }
        };

        Self {
            secret,
            expiration_minutes: std::env::var("JWT_EXPIRATION_MINUTES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(1440), // 默认 24 小时
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "order-server".to_string()),
            audience: std::env::var("JWT_AUDIENCE").unwrap_or_else(|_| "order-clients".to_string()),
        }
    }
}

/// 存储在令牌中的 JWT Claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// 用户 ID (Subject)
    pub sub: String,
    /// 用户类型: "buyer" | "employee"
    pub user_type: String,
    /// 邮箱
    pub email: String,
    /// 部门代码 (仅员工)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department_code: Option<String>,
    /// 角色列表 (逗号分隔)
    pub roles: String,
    /// 过期时间戳
    pub exp: i64,
    /// 签发时间戳
    pub iat: i64,
    /// 签发者
    pub iss: String,
    /// 受众
    pub aud: String,
}

/// JWT 错误
#[derive(Error, Debug)]
pub enum JwtError {
    #[error("无效令牌: {0}")]
    InvalidToken(String),

    #[error("令牌已过期")]
    ExpiredToken,

    #[error("无效签名")]
    InvalidSignature,

    #[error("令牌生成失败: {0}")]
    GenerationFailed(String),

    #[error("配置错误: {0}")]
    ConfigError(String),
}

/// 生成可打印的安全 JWT 密钥 (用于开发环境)
pub fn generate_secure_printable_jwt_secret() -> String {
    let allowed_chars =
        "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!@#$%^&*()-_=+[]{}|;:,.<>?";

    let rng = SystemRandom::new();
    let mut key = String::new();

    for _ in 0..64 {
        let mut byte = [0u8; 1];
        if rng.fill(&mut byte).is_err() {
            return "OrderServerDevelopmentSecureKey2026!".to_string();
        }
        let idx = (byte[0] as usize) % allowed_chars.len();
        key.push(allowed_chars.chars().nth(idx).unwrap());
    }

    key
}

/// 从环境变量安全地加载 JWT 密钥
fn load_jwt_secret() -> Result<Vec<u8>, JwtError> {
    match std::env::var("JWT_SECRET") {
        Ok(secret) => {
            if secret.len() < 32 {
                return Err(JwtError::ConfigError(
                    "JWT_SECRET must be at least 32 characters long".to_string(),
                ));
            }
            Ok(secret.into_bytes())
        }
        Err(_) => {
            #[cfg(debug_assertions)]
            {
                tracing::warn!("JWT_SECRET not set, generating temporary key for development");
                Ok(generate_secure_printable_jwt_secret().into_bytes())
            }
            #[cfg(not(debug_assertions))]
            {
                Err(JwtError::ConfigError(
                    "JWT_SECRET environment variable must be set in production!".to_string(),
                ))
            }
        }
    }
}

/// 用户类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserType {
    Buyer,
    Employee,
}

impl UserType {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserType::Buyer => "buyer",
            UserType::Employee => "employee",
        }
    }
}

/// JWT 令牌服务
#[derive(Debug, Clone)]
pub struct JwtService {
    pub config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtService {
    /// 使用默认配置创建新的 JWT 服务
    pub fn new() -> Self {
        Self::with_config(JwtConfig::default())
    }

    /// 使用指定配置创建新的 JWT 服务
    pub fn with_config(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    /// 为用户生成新令牌
    pub fn generate_token(
        &self,
        user_id: &str,
        user_type: UserType,
        email: &str,
        department_code: Option<&str>,
        roles: &[String],
    ) -> Result<String, JwtError> {
        let now = Utc::now();
        let expiration = now + Duration::minutes(self.config.expiration_minutes);

        let claims = Claims {
            sub: user_id.to_string(),
            user_type: user_type.as_str().to_string(),
            email: email.to_string(),
            department_code: department_code.map(str::to_string),
            roles: roles.join(","),
            exp: expiration.timestamp(),
            iat: now.timestamp(),
            iss: self.config.issuer.clone(),
            aud: self.config.audience.clone(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| JwtError::GenerationFailed(e.to_string()))
    }

    /// 验证并解码令牌
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[&self.config.audience]);
        validation.set_issuer(&[&self.config.issuer]);
        validation.set_required_spec_claims(&["sub", "exp", "iat", "iss", "aud"]);

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => JwtError::ExpiredToken,
                ErrorKind::InvalidSignature => JwtError::InvalidSignature,
                ErrorKind::InvalidToken => JwtError::InvalidToken(e.to_string()),
                _ => JwtError::InvalidToken(format!("Token validation failed: {}", e)),
            }
        })?;

        Ok(token_data.claims)
    }

    /// 从 Authorization 头提取令牌
    pub fn extract_from_header(header: &str) -> Option<&str> {
        header.strip_prefix("Bearer ")
    }
}

impl Default for JwtService {
    fn default() -> Self {
        Self::new()
    }
}

/// 当前用户上下文 (从 JWT Claims 解析)
///
/// 由认证中间件创建，注入到请求处理函数
#[derive(Debug, Clone)]
pub struct CurrentUser {
    /// 用户 ID
    pub id: String,
    /// 用户类型
    pub user_type: String,
    /// 邮箱
    pub email: String,
    /// 部门代码 (仅员工)
    pub department_code: Option<String>,
    /// 角色列表
    pub roles: Vec<String>,
}

impl From<Claims> for CurrentUser {
    fn from(claims: Claims) -> Self {
        let roles = if claims.roles.is_empty() {
            vec![]
        } else {
            claims.roles.split(',').map(|s| s.to_string()).collect()
        };

        Self {
            id: claims.sub,
            user_type: claims.user_type,
            email: claims.email,
            department_code: claims.department_code,
            roles,
        }
    }
}

impl CurrentUser {
    pub fn is_buyer(&self) -> bool {
        self.user_type == "buyer"
    }

    pub fn is_employee(&self) -> bool {
        self.user_type == "employee"
    }

    /// 是否管理员 (角色包含 "admin")
    pub fn is_admin(&self) -> bool {
        self.has_role("admin")
    }

    /// 检查是否拥有指定角色
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }

    /// 检查部门代码
    pub fn in_department(&self, code: &str) -> bool {
        self.department_code.as_deref() == Some(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jwt_generation_and_validation() {
        let service = JwtService::new();
        let roles = vec!["sourcing".to_string(), "approve_order".to_string()];

        let token = service
            .generate_token("emp-1", UserType::Employee, "sam@acme.test", Some("S1"), &roles)
            .expect("Failed to generate test token");

        let claims = service
            .validate_token(&token)
            .expect("Failed to validate test token");

        assert_eq!(claims.sub, "emp-1");
        assert_eq!(claims.user_type, "employee");
        assert_eq!(claims.department_code.as_deref(), Some("S1"));
        assert_eq!(claims.roles, "sourcing,approve_order");
    }

    #[test]
    fn test_buyer_token_has_no_department() {
        let service = JwtService::new();
        let token = service
            .generate_token(
                "buyer-1",
                UserType::Buyer,
                "acme@buyers.test",
                None,
                &["buyer".to_string()],
            )
            .unwrap();

        let user = CurrentUser::from(service.validate_token(&token).unwrap());
        assert!(user.is_buyer());
        assert!(!user.is_employee());
        assert_eq!(user.department_code, None);
        assert!(user.has_role("buyer"));
    }

    #[test]
    fn test_current_user_department_check() {
        let user = CurrentUser {
            id: "emp-1".to_string(),
            user_type: "employee".to_string(),
            email: "sam@acme.test".to_string(),
            department_code: Some("S1".to_string()),
            roles: vec!["sourcing".to_string()],
        };

        assert!(user.in_department("S1"));
        assert!(!user.in_department("P1"));
        assert!(!user.is_admin());
    }

    #[test]
    fn test_token_from_other_service_is_rejected() {
        let service_a = JwtService::with_config(JwtConfig {
            secret: "a".repeat(32),
            expiration_minutes: 10,
            issuer: "order-server".to_string(),
            audience: "order-clients".to_string(),
        });
        let service_b = JwtService::with_config(JwtConfig {
            secret: "b".repeat(32),
            expiration_minutes: 10,
            issuer: "order-server".to_string(),
            audience: "order-clients".to_string(),
        });

        let token = service_a
            .generate_token("u1", UserType::Buyer, "x@y.test", None, &[])
            .unwrap();
        assert!(service_b.validate_token(&token).is_err());
    }
}
