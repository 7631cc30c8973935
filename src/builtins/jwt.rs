pub mod access_token {
    use jsonwebtoken::{decode, errors::Error, Algorithm, DecodingKey, Validation};
    use serde::{Deserialize, Serialize};

    use crate::config;
    use crate::model::Account::AccountRole;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct Claims {
        pub sub: String,
        pub role: AccountRole,
        pub iat: usize,
        pub exp: usize,
    }

    pub fn verify(token: &str) -> Result<Claims, Error> {
        let config = config::load();

        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(config.jwt_access_secret.as_ref()),
            &Validation::new(Algorithm::HS256),
        )?;

        Ok(data.claims)
    }
}
