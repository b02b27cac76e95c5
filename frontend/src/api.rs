use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;
use shared::{
    ClientError, CodeEntry, LoginRequest, LoginResponse, RedeemRequest, RedeemResponse,
    CODES_PATH, LOGIN_PATH, REDEEM_PATH,
};

fn transport(e: gloo_net::Error) -> ClientError {
    ClientError::Transport(e.to_string())
}

// Bodies are read whatever the status code; the views only look at the payload.
async fn decode<T: DeserializeOwned>(resp: Response) -> Result<T, ClientError> {
    resp.json::<T>()
        .await
        .map_err(|e| ClientError::Decode(e.to_string()))
}

pub async fn fetch_codes() -> Result<Vec<CodeEntry>, ClientError> {
    let resp = Request::get(CODES_PATH).send().await.map_err(transport)?;
    decode(resp).await
}

pub async fn redeem(body: &RedeemRequest) -> Result<RedeemResponse, ClientError> {
    let resp = Request::post(REDEEM_PATH)
        .json(body)
        .map_err(transport)?
        .send()
        .await
        .map_err(transport)?;
    decode(resp).await
}

pub async fn login(body: &LoginRequest) -> Result<LoginResponse, ClientError> {
    let resp = Request::post(LOGIN_PATH)
        .json(body)
        .map_err(transport)?
        .send()
        .await
        .map_err(transport)?;
    decode(resp).await
}
