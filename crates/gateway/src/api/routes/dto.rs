//! Incoming request payloads. All contract fields arrive as strings; the
//! required ones are modeled as options so that missing or malformed values
//! produce a structured validation error instead of an opaque
//! deserialization failure.

use {
    crate::{
        api::error::Validation,
        domain::{eth, swap},
        infra::tokens,
    },
    bigdecimal::BigDecimal,
    serde::Deserialize,
    std::str::FromStr,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub base: Option<String>,
    pub quote: Option<String>,
    pub amount: Option<String>,
}

impl Quote {
    pub fn into_domain(
        self,
        side: swap::Side,
        tokens: &tokens::Registry,
    ) -> Result<swap::QuoteRequest, Validation> {
        into_quote_request(self.base, self.quote, self.amount, side, tokens)
    }
}

/// A trade payload. Does not implement Debug: it carries the signer key.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trade {
    pub base: Option<String>,
    pub quote: Option<String>,
    pub amount: Option<String>,
    pub private_key: Option<String>,
    pub max_price: Option<String>,
    pub gas_price: Option<String>,
}

impl Trade {
    pub fn into_domain(
        self,
        side: swap::Side,
        tokens: &tokens::Registry,
    ) -> Result<swap::TradeRequest, Validation> {
        let swap = into_quote_request(self.base, self.quote, self.amount, side, tokens)?;
        let private_key = self
            .private_key
            .filter(|key| !key.is_empty())
            .ok_or_else(|| Validation("missing required parameter privateKey".to_owned()))?;
        Ok(swap::TradeRequest {
            swap,
            signer: eth::SignerKey::new(private_key),
            max_price: self
                .max_price
                .map(|raw| parse_positive_decimal(&raw, "maxPrice"))
                .transpose()?,
            gas_price: self
                .gas_price
                .map(|raw| parse_positive_decimal(&raw, "gasPrice"))
                .transpose()?,
        })
    }
}

fn into_quote_request(
    base: Option<String>,
    quote: Option<String>,
    amount: Option<String>,
    side: swap::Side,
    tokens: &tokens::Registry,
) -> Result<swap::QuoteRequest, Validation> {
    let base = resolve(tokens, base, "base")?;
    let quote = resolve(tokens, quote, "quote")?;
    if base.address == quote.address {
        return Err(Validation("base and quote are the same token".to_owned()));
    }
    let amount = amount.ok_or_else(|| Validation("missing required parameter amount".to_owned()))?;
    let amount = parse_positive_decimal(&amount, "amount")?;
    Ok(swap::QuoteRequest {
        base,
        quote,
        amount,
        side,
    })
}

fn resolve(
    tokens: &tokens::Registry,
    symbol: Option<String>,
    field: &str,
) -> Result<swap::Token, Validation> {
    let symbol = symbol
        .filter(|symbol| !symbol.is_empty())
        .ok_or_else(|| Validation(format!("missing required parameter {field}")))?;
    let address = tokens
        .resolve(&symbol)
        .ok_or_else(|| Validation(format!("unknown token {symbol:?}")))?;
    Ok(swap::Token { symbol, address })
}

fn parse_positive_decimal(raw: &str, field: &str) -> Result<BigDecimal, Validation> {
    let value = BigDecimal::from_str(raw)
        .map_err(|_| Validation(format!("{field} {raw:?} is not a decimal number")))?;
    if value <= BigDecimal::from(0) {
        return Err(Validation(format!("{field} {raw:?} must be positive")));
    }
    Ok(value)
}
