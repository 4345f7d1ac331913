//! Turns one order input into an [`Order`], collecting every problem found.
//!
//! A problem is either fatal, in which case the row produces no order, or
//! partial, in which case only the offending part (a note, the shipping
//! address, a metadata entry...) is left out.

use super::payment_events::{order_captured, order_refunded};
use super::resolver::{InstanceResolver, KeyCandidate, Resolved};
use crate::domain::catalog::{
    App, Channel, LookupField, ProductVariant, ShippingMethod, TaxClass, User, Warehouse,
};
use crate::domain::errors::{OrderBulkCreateError, OrderBulkCreateErrorCode as Code};
use crate::domain::input::{
    AddressInput, MetadataInput, OrderBulkCreateDeliveryMethodInput, OrderBulkCreateInput,
    OrderBulkCreateNoteInput, OrderBulkCreateOrderLineInput, OrderBulkCreatePaymentInput,
    TaxedMoneyInput,
};
use crate::domain::money::TaxedMoney;
use crate::domain::order::{
    Address, DeliveryMethod, MetadataItem, Order, OrderChargeStatus, OrderEvent, OrderEventKind,
    OrderLine,
};
use crate::domain::payment::{Payment, PaymentAction};
use crate::error::Result;
use rust_decimal::Decimal;
use std::sync::Arc;
use uuid::Uuid;

/// Result of building a single row.
#[derive(Debug, Default)]
pub struct RowOutcome {
    /// `None` when a fatal problem was found.
    pub order: Option<Order>,
    pub errors: Vec<OrderBulkCreateError>,
}

impl RowOutcome {
    pub fn rejected(errors: Vec<OrderBulkCreateError>) -> Self {
        Self {
            order: None,
            errors,
        }
    }
}

#[derive(Default)]
struct Problems {
    errors: Vec<OrderBulkCreateError>,
    fatal: bool,
}

impl Problems {
    fn fatal(&mut self, error: OrderBulkCreateError) {
        self.errors.push(error);
        self.fatal = true;
    }

    fn partial(&mut self, error: OrderBulkCreateError) {
        self.errors.push(error);
    }
}

struct Delivery {
    method: DeliveryMethod,
    price: TaxedMoney,
    tax_class: Option<Arc<TaxClass>>,
}

/// Builds orders from inputs, resolving references through a shared resolver.
pub struct OrderBuilder<'r, 'a> {
    resolver: &'r mut InstanceResolver<'a>,
    problems: Problems,
}

impl<'r, 'a> OrderBuilder<'r, 'a> {
    pub fn new(resolver: &'r mut InstanceResolver<'a>) -> Self {
        Self {
            resolver,
            problems: Problems::default(),
        }
    }

    pub async fn build(mut self, input: &OrderBulkCreateInput) -> Result<RowOutcome> {
        let channel = self.channel(&input.channel).await?;
        let currency = channel.as_ref().map(|c| c.currency_code.clone());
        let currency = currency.as_deref();

        let customer = self.customer(input).await?;
        let billing_address = match validate_address(&input.billing_address) {
            Ok(address) => Some(address),
            Err(errors) => {
                for error in errors {
                    self.problems.fatal(error.nested("billingAddress"));
                }
                None
            }
        };
        let shipping_address = match input.shipping_address.as_ref().map(validate_address) {
            Some(Ok(address)) => Some(address),
            Some(Err(errors)) => {
                for error in errors {
                    self.problems.partial(error.nested("shippingAddress"));
                }
                None
            }
            None => None,
        };
        let language_code = match normalize_language_code(&input.language_code) {
            Some(code) => code,
            None => {
                self.problems.fatal(OrderBulkCreateError::at(
                    "languageCode",
                    format!("Invalid language code: {}.", input.language_code),
                    Code::Invalid,
                ));
                String::new()
            }
        };

        let delivery = self
            .delivery(&input.delivery_method, channel.as_ref(), currency)
            .await?;
        let lines = self.lines(&input.lines, currency).await?;
        let notes = self.notes(&input.notes, input).await?;
        let metadata = self.metadata(&input.metadata, "metadata");
        let private_metadata = self.metadata(&input.private_metadata, "privateMetadata");
        let redirect_url = self.redirect_url(input.redirect_url.as_deref());
        let weight = self.weight(input.weight);
        let payments = self.payments(&input.payments, currency);

        let (Some(channel), Some(customer), Some(billing_address), Some(delivery), Some(lines)) =
            (channel, customer, billing_address, delivery, lines)
        else {
            return Ok(RowOutcome::rejected(self.problems.errors));
        };
        if self.problems.fatal {
            return Ok(RowOutcome::rejected(self.problems.errors));
        }

        let mut order = Order {
            id: Uuid::new_v4(),
            number: input.number,
            external_reference: input.external_reference.clone(),
            channel_id: channel.id,
            channel_slug: channel.slug.clone(),
            currency: channel.currency_code.clone(),
            status: input.status.unwrap_or_default(),
            user_id: customer.user_id,
            user_email: customer.email,
            created_at: input.created_at,
            language_code,
            billing_address,
            shipping_address,
            delivery_method: delivery.method,
            shipping_price: delivery.price,
            shipping_tax_rate: input.delivery_method.shipping_tax_rate,
            shipping_tax_class_id: delivery.tax_class.as_ref().map(|t| t.id),
            shipping_tax_class_name: delivery.tax_class.as_ref().map(|t| t.name.clone()),
            lines,
            total: TaxedMoney::ZERO,
            undiscounted_total: TaxedMoney::ZERO,
            total_charged: Decimal::ZERO,
            charge_status: OrderChargeStatus::None,
            payments: Vec::new(),
            metadata,
            private_metadata,
            customer_note: input.customer_note.clone().unwrap_or_default(),
            tracking_client_id: input.tracking_client_id.clone().unwrap_or_default(),
            redirect_url,
            display_gross_prices: input.display_gross_prices.unwrap_or(true),
            weight,
            events: notes,
        };
        if order.update_totals().is_err() {
            self.problems.fatal(OrderBulkCreateError::at(
                "lines",
                "Order total exceeds the largest supported amount.",
                Code::PriceError,
            ));
            return Ok(RowOutcome::rejected(self.problems.errors));
        }
        order.update_charge_status();

        for (index, payment_input) in payments {
            let mut payment = Payment::new(
                &payment_input.gateway,
                &order.currency,
                payment_input.total,
            );
            payment.psp_reference = payment_input.psp_reference.clone();
            payment.captured_amount = payment_input.captured;

            let mut overflow = None;
            if payment_input.captured > Decimal::ZERO {
                let action = PaymentAction::new(&payment, payment_input.captured);
                if order_captured(&mut order, action, input.created_at).is_err() {
                    overflow = Some("captured");
                }
            }
            if overflow.is_none() && payment_input.refunded > Decimal::ZERO {
                let action = PaymentAction::new(&payment, payment_input.refunded);
                if order_refunded(&mut order, action, input.created_at).is_err() {
                    overflow = Some("refunded");
                }
            }
            if let Some(field) = overflow {
                self.problems.fatal(OrderBulkCreateError::at(
                    &format!("payments.{index}.{field}"),
                    "Charged amount exceeds the largest supported amount.",
                    Code::PriceError,
                ));
                return Ok(RowOutcome::rejected(self.problems.errors));
            }
            payment.captured_amount -= payment_input.refunded;
            order.payments.push(payment);
        }

        Ok(RowOutcome {
            order: Some(order),
            errors: self.problems.errors,
        })
    }

    async fn channel(&mut self, slug: &str) -> Result<Option<Channel>> {
        let channel = self.resolver.catalog().channel(slug).await?;
        if channel.is_none() {
            self.problems.fatal(OrderBulkCreateError::at(
                "channel",
                format!("Channel with slug {slug} doesn't exist."),
                Code::NotFound,
            ));
        }
        Ok(channel)
    }

    /// Resolves the customer. An email that matches no account makes a guest order.
    async fn customer(&mut self, input: &OrderBulkCreateInput) -> Result<Option<Customer>> {
        let user_input = &input.user;
        let keys = [
            KeyCandidate::new("id", LookupField::Id, user_input.id.as_deref()),
            KeyCandidate::new("email", LookupField::Email, user_input.email.as_deref()),
            KeyCandidate::new(
                "externalReference",
                LookupField::ExternalReference,
                user_input.external_reference.as_deref(),
            ),
        ];

        match self.resolver.resolve::<User>(&keys).await? {
            Ok(user) => Ok(Some(Customer {
                user_id: Some(user.id),
                email: user.email.clone(),
            })),
            Err(error)
                if error.code == Code::NotFound && error.field.as_deref() == Some("email") =>
            {
                let email = user_input.email.clone().unwrap_or_default();
                Ok(Some(Customer {
                    user_id: None,
                    email: email.trim().to_lowercase(),
                }))
            }
            Err(error) => {
                self.problems.fatal(error.nested("user"));
                Ok(None)
            }
        }
    }

    async fn delivery(
        &mut self,
        input: &OrderBulkCreateDeliveryMethodInput,
        channel: Option<&Channel>,
        currency: Option<&str>,
    ) -> Result<Option<Delivery>> {
        let mut errors = Vec::new();

        let warehouse_keys = [
            KeyCandidate::new("warehouseId", LookupField::Id, input.warehouse_id.as_deref()),
            KeyCandidate::new(
                "warehouseName",
                LookupField::Name,
                input.warehouse_name.as_deref(),
            ),
        ];
        let shipping_keys = [
            KeyCandidate::new(
                "shippingMethodId",
                LookupField::Id,
                input.shipping_method_id.as_deref(),
            ),
            KeyCandidate::new(
                "shippingMethodName",
                LookupField::Name,
                input.shipping_method_name.as_deref(),
            ),
        ];
        let has_warehouse = warehouse_keys.iter().any(|k| k.value.is_some());
        let has_shipping = shipping_keys.iter().any(|k| k.value.is_some());

        let mut method = None;
        let mut listed_price = None;
        match (has_warehouse, has_shipping) {
            (true, true) => errors.push(OrderBulkCreateError::new(
                None,
                "Only one of [warehouseId, warehouseName, shippingMethodId, shippingMethodName] \
                 arguments can be provided to resolve delivery method.",
                Code::Invalid,
            )),
            (false, false) => errors.push(OrderBulkCreateError::new(
                None,
                "One of [warehouseId, warehouseName, shippingMethodId, shippingMethodName] \
                 arguments must be provided to resolve delivery method.",
                Code::Required,
            )),
            (true, false) => match self.resolver.resolve::<Warehouse>(&warehouse_keys).await? {
                Ok(warehouse) => {
                    method = Some(DeliveryMethod::CollectionPoint {
                        warehouse_id: warehouse.id,
                        warehouse_name: warehouse.name.clone(),
                    });
                    listed_price = Some(Decimal::ZERO);
                }
                Err(error) => errors.push(error),
            },
            (false, true) => {
                match self
                    .resolver
                    .resolve::<ShippingMethod>(&shipping_keys)
                    .await?
                {
                    Ok(shipping_method) => {
                        if let Some(channel) = channel {
                            listed_price = self
                                .resolver
                                .catalog()
                                .shipping_price(shipping_method.id, channel.id)
                                .await?;
                            if listed_price.is_none() && input.shipping_price.is_none() {
                                errors.push(OrderBulkCreateError::new(
                                    None,
                                    format!(
                                        "Shipping method {} is not available in channel {}.",
                                        shipping_method.name, channel.slug
                                    ),
                                    Code::NotFound,
                                ));
                            }
                        }
                        method = Some(DeliveryMethod::Shipping {
                            shipping_method_id: shipping_method.id,
                            shipping_method_name: shipping_method.name.clone(),
                        });
                    }
                    Err(error) => errors.push(error),
                }
            }
        }

        let tax_keys = [
            KeyCandidate::new(
                "shippingTaxClassId",
                LookupField::Id,
                input.shipping_tax_class_id.as_deref(),
            ),
            KeyCandidate::new(
                "shippingTaxClassName",
                LookupField::Name,
                input.shipping_tax_class_name.as_deref(),
            ),
        ];
        let tax_class = self.optional_tax_class(&tax_keys, &mut errors).await?;

        if input.shipping_tax_rate < Decimal::ZERO {
            errors.push(OrderBulkCreateError::at(
                "shippingTaxRate",
                "Value must be greater or equal to 0.",
                Code::Invalid,
            ));
        }

        let price = match &input.shipping_price {
            Some(price) => validate_taxed_money(price, currency, "shippingPrice", &mut errors),
            None => {
                let listed = listed_price.unwrap_or(Decimal::ZERO);
                TaxedMoney::new(listed, listed)
            }
        };

        let has_errors = !errors.is_empty();
        for error in errors {
            self.problems.fatal(error.nested("deliveryMethod"));
        }
        if has_errors {
            return Ok(None);
        }

        Ok(method.map(|method| Delivery {
            method,
            price,
            tax_class,
        }))
    }

    async fn optional_tax_class(
        &mut self,
        keys: &[KeyCandidate<'_>],
        errors: &mut Vec<OrderBulkCreateError>,
    ) -> Result<Option<Arc<TaxClass>>> {
        Ok(match self.resolver.resolve_optional::<TaxClass>(keys).await? {
            Ok(tax_class) => tax_class,
            Err(error) => {
                errors.push(error);
                None
            }
        })
    }

    async fn lines(
        &mut self,
        inputs: &[OrderBulkCreateOrderLineInput],
        currency: Option<&str>,
    ) -> Result<Option<Vec<OrderLine>>> {
        if inputs.is_empty() {
            self.problems.fatal(OrderBulkCreateError::at(
                "lines",
                "At least one order line is required.",
                Code::Required,
            ));
            return Ok(None);
        }

        let mut lines = Vec::with_capacity(inputs.len());
        let mut failed = false;
        for (index, input) in inputs.iter().enumerate() {
            match self.line(input, currency).await? {
                Ok(line) => lines.push(line),
                Err(errors) => {
                    failed = true;
                    for error in errors {
                        self.problems.fatal(error.nested(&format!("lines.{index}")));
                    }
                }
            }
        }

        Ok((!failed).then_some(lines))
    }

    async fn line(
        &mut self,
        input: &OrderBulkCreateOrderLineInput,
        currency: Option<&str>,
    ) -> Result<std::result::Result<OrderLine, Vec<OrderBulkCreateError>>> {
        let mut errors = Vec::new();

        let variant_keys = [
            KeyCandidate::new("variantId", LookupField::Id, input.variant_id.as_deref()),
            KeyCandidate::new("variantSku", LookupField::Sku, input.variant_sku.as_deref()),
            KeyCandidate::new(
                "variantExternalReference",
                LookupField::ExternalReference,
                input.variant_external_reference.as_deref(),
            ),
        ];
        let variant: Resolved<Arc<ProductVariant>> =
            self.resolver.resolve::<ProductVariant>(&variant_keys).await?;
        let variant = match variant {
            Ok(variant) => Some(variant),
            Err(error) => {
                errors.push(error);
                None
            }
        };

        let tax_keys = [
            KeyCandidate::new("taxClassId", LookupField::Id, input.tax_class_id.as_deref()),
            KeyCandidate::new(
                "taxClassName",
                LookupField::Name,
                input.tax_class_name.as_deref(),
            ),
        ];
        let tax_class = self.optional_tax_class(&tax_keys, &mut errors).await?;

        let quantity = match u32::try_from(input.quantity) {
            Ok(quantity) if quantity > 0 => quantity,
            _ => {
                errors.push(OrderBulkCreateError::at(
                    "quantity",
                    "Invalid quantity. Must be greater than 0.",
                    Code::InvalidQuantity,
                ));
                0
            }
        };
        let quantity_fulfilled = match u32::try_from(input.quantity_fulfilled) {
            Ok(fulfilled) if fulfilled <= quantity || quantity == 0 => fulfilled,
            _ => {
                errors.push(OrderBulkCreateError::at(
                    "quantityFulfilled",
                    "Invalid quantity fulfilled. Must be between 0 and quantity.",
                    Code::InvalidQuantity,
                ));
                0
            }
        };

        let total_price = validate_taxed_money(&input.total_price, currency, "totalPrice", &mut errors);
        let undiscounted_total_price = validate_taxed_money(
            &input.undiscounted_total_price,
            currency,
            "undiscountedTotalPrice",
            &mut errors,
        );
        if input.tax_rate < Decimal::ZERO {
            errors.push(OrderBulkCreateError::at(
                "taxRate",
                "Value must be greater or equal to 0.",
                Code::Invalid,
            ));
        }

        let Some(variant) = variant else {
            return Ok(Err(errors));
        };
        if !errors.is_empty() {
            return Ok(Err(errors));
        }

        Ok(Ok(OrderLine {
            id: Uuid::new_v4(),
            variant_id: variant.id,
            product_name: non_blank(input.product_name.as_deref())
                .unwrap_or(variant.product_name.as_str())
                .to_string(),
            variant_name: non_blank(input.variant_name.as_deref())
                .unwrap_or(variant.name.as_str())
                .to_string(),
            translated_product_name: input.translated_product_name.clone().unwrap_or_default(),
            translated_variant_name: input.translated_variant_name.clone().unwrap_or_default(),
            product_sku: variant.sku.clone(),
            is_shipping_required: input.is_shipping_required,
            is_gift_card: input.is_gift_card,
            quantity,
            quantity_fulfilled,
            unit_price: total_price.per_unit(quantity),
            total_price,
            undiscounted_total_price,
            tax_rate: input.tax_rate,
            tax_class_id: tax_class.as_ref().map(|t| t.id),
            tax_class_name: tax_class.as_ref().map(|t| t.name.clone()),
            created_at: input.created_at,
        }))
    }

    /// Valid notes become `NoteAdded` events; invalid ones are dropped.
    async fn notes(
        &mut self,
        inputs: &[OrderBulkCreateNoteInput],
        order: &OrderBulkCreateInput,
    ) -> Result<Vec<OrderEvent>> {
        let mut events = Vec::with_capacity(inputs.len());

        for (index, note) in inputs.iter().enumerate() {
            let prefix = format!("notes.{index}");
            let mut errors = Vec::new();

            if note.message.trim().is_empty() {
                errors.push(OrderBulkCreateError::at(
                    "message",
                    "Note message can't be empty.",
                    Code::Required,
                ));
            }
            if note.user_id.is_some() && note.app_id.is_some() {
                errors.push(OrderBulkCreateError::new(
                    None,
                    "Note can be assigned to a user or an app, not both.",
                    Code::Invalid,
                ));
            }

            let user_keys = [KeyCandidate::new("userId", LookupField::Id, note.user_id.as_deref())];
            let user_id = match self.resolver.resolve_optional::<User>(&user_keys).await? {
                Ok(user) => user.map(|u| u.id),
                Err(error) => {
                    errors.push(error);
                    None
                }
            };
            let app_keys = [KeyCandidate::new("appId", LookupField::Id, note.app_id.as_deref())];
            let app_id = match self.resolver.resolve_optional::<App>(&app_keys).await? {
                Ok(app) => app.map(|a| a.id),
                Err(error) => {
                    errors.push(error);
                    None
                }
            };

            if errors.is_empty() {
                let mut event = OrderEvent::new(
                    note.date.unwrap_or(order.created_at),
                    OrderEventKind::NoteAdded {
                        message: note.message.trim().to_string(),
                    },
                );
                event.user_id = user_id;
                event.app_id = app_id;
                events.push(event);
            } else {
                for error in errors {
                    self.problems.partial(error.nested(&prefix));
                }
            }
        }

        Ok(events)
    }

    fn metadata(&mut self, inputs: &[MetadataInput], field: &str) -> Vec<MetadataItem> {
        let mut items = Vec::with_capacity(inputs.len());
        for (index, item) in inputs.iter().enumerate() {
            if item.key.trim().is_empty() {
                self.problems.partial(OrderBulkCreateError::at(
                    &format!("{field}.{index}.key"),
                    "Metadata key cannot be empty.",
                    Code::Invalid,
                ));
                continue;
            }
            items.push(MetadataItem {
                key: item.key.trim().to_string(),
                value: item.value.clone(),
            });
        }
        items
    }

    fn redirect_url(&mut self, raw: Option<&str>) -> Option<String> {
        let raw = non_blank(raw)?;
        match url::Url::parse(raw) {
            Ok(url) => Some(url.to_string()),
            Err(err) => {
                self.problems.partial(OrderBulkCreateError::at(
                    "redirectUrl",
                    format!("Invalid URL: {err}."),
                    Code::Invalid,
                ));
                None
            }
        }
    }

    fn weight(&mut self, weight: Option<Decimal>) -> Decimal {
        match weight {
            Some(weight) if weight < Decimal::ZERO => {
                self.problems.partial(OrderBulkCreateError::at(
                    "weight",
                    "Order can't have negative weight.",
                    Code::Invalid,
                ));
                Decimal::ZERO
            }
            Some(weight) => weight,
            None => Decimal::ZERO,
        }
    }

    fn payments<'i>(
        &mut self,
        inputs: &'i [OrderBulkCreatePaymentInput],
        currency: Option<&str>,
    ) -> Vec<(usize, &'i OrderBulkCreatePaymentInput)> {
        let mut valid = Vec::with_capacity(inputs.len());

        for (index, input) in inputs.iter().enumerate() {
            let mut errors = Vec::new();

            if input.gateway.trim().is_empty() {
                errors.push(OrderBulkCreateError::at(
                    "gateway",
                    "Payment gateway is required.",
                    Code::Required,
                ));
            }
            if let Some(currency) = currency
                && input.currency != currency
            {
                errors.push(OrderBulkCreateError::at(
                    "currency",
                    format!(
                        "Currency from input ({}) doesn't match channel currency ({}).",
                        input.currency, currency
                    ),
                    Code::IncorrectCurrency,
                ));
            }
            for (field, amount) in [
                ("total", input.total),
                ("captured", input.captured),
                ("refunded", input.refunded),
            ] {
                if amount < Decimal::ZERO {
                    errors.push(OrderBulkCreateError::at(
                        field,
                        "Value must be greater or equal to 0.",
                        Code::Invalid,
                    ));
                }
            }
            if input.captured > input.total {
                errors.push(OrderBulkCreateError::at(
                    "captured",
                    "Captured amount can't exceed payment total.",
                    Code::Invalid,
                ));
            }
            if input.refunded > input.captured {
                errors.push(OrderBulkCreateError::at(
                    "refunded",
                    "Refunded amount can't exceed captured amount.",
                    Code::Invalid,
                ));
            }

            if errors.is_empty() {
                valid.push((index, input));
            } else {
                for error in errors {
                    self.problems.fatal(error.nested(&format!("payments.{index}")));
                }
            }
        }

        valid
    }
}

struct Customer {
    user_id: Option<Uuid>,
    email: String,
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Checks a submitted price: non-negative amounts, the expected currency and
/// a gross amount covering the net one.
fn validate_taxed_money(
    input: &TaxedMoneyInput,
    currency: Option<&str>,
    field: &str,
    errors: &mut Vec<OrderBulkCreateError>,
) -> TaxedMoney {
    if input.net < Decimal::ZERO || input.gross < Decimal::ZERO {
        errors.push(OrderBulkCreateError::at(
            field,
            "Value must be greater or equal to 0.",
            Code::Invalid,
        ));
    }
    if let Some(currency) = currency
        && input.currency != currency
    {
        errors.push(OrderBulkCreateError::at(
            &format!("{field}.currency"),
            format!(
                "Currency from input ({}) doesn't match channel currency ({}).",
                input.currency, currency
            ),
            Code::IncorrectCurrency,
        ));
    }
    if input.net > input.gross {
        errors.push(OrderBulkCreateError::at(
            field,
            "Net price can't be greater than gross price.",
            Code::PriceError,
        ));
    }
    TaxedMoney::new(input.net, input.gross)
}

/// Validates an address. Field paths in the returned errors are relative to it.
pub fn validate_address(
    input: &AddressInput,
) -> std::result::Result<Address, Vec<OrderBulkCreateError>> {
    let mut errors = Vec::new();
    let mut required = |field: &str, value: &Option<String>| -> String {
        match non_blank(value.as_deref()) {
            Some(value) => value.to_string(),
            None => {
                errors.push(OrderBulkCreateError::at(
                    field,
                    "This field is required.",
                    Code::Required,
                ));
                String::new()
            }
        }
    };

    let street_address_1 = required("streetAddress1", &input.street_address_1);
    let city = required("city", &input.city);
    let postal_code = required("postalCode", &input.postal_code);
    let country = required("country", &input.country).to_ascii_uppercase();

    if !country.is_empty() && (country.len() != 2 || !country.chars().all(|c| c.is_ascii_alphabetic()))
    {
        errors.push(OrderBulkCreateError::at(
            "country",
            format!("{country} is not a valid country code."),
            Code::Invalid,
        ));
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    let optional = |value: &Option<String>| non_blank(value.as_deref()).unwrap_or_default().to_string();
    Ok(Address {
        first_name: optional(&input.first_name),
        last_name: optional(&input.last_name),
        company_name: optional(&input.company_name),
        street_address_1,
        street_address_2: optional(&input.street_address_2),
        city: city.to_uppercase(),
        city_area: optional(&input.city_area),
        postal_code,
        country,
        country_area: optional(&input.country_area),
        phone: optional(&input.phone),
    })
}

/// Normalizes `en`, `en_us`, `EN-US`... to `en` / `en-US`.
pub fn normalize_language_code(raw: &str) -> Option<String> {
    let mut parts = raw.trim().split(['_', '-']);
    let language = parts.next()?;
    if language.len() != 2 || !language.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }

    let mut code = language.to_ascii_lowercase();
    if let Some(region) = parts.next() {
        if region.len() != 2 || !region.chars().all(|c| c.is_ascii_alphabetic()) {
            return None;
        }
        code.push('-');
        code.push_str(&region.to_ascii_uppercase());
    }
    if parts.next().is_some() {
        return None;
    }
    Some(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn address() -> AddressInput {
        AddressInput {
            first_name: Some("Jane".to_string()),
            street_address_1: Some("Tęczowa 7".to_string()),
            city: Some("Wrocław".to_string()),
            postal_code: Some("53-601".to_string()),
            country: Some("pl".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_validate_address_normalizes() {
        let address = validate_address(&address()).unwrap();
        assert_eq!(address.country, "PL");
        assert_eq!(address.city, "WROCŁAW");
        assert_eq!(address.first_name, "Jane");
        assert_eq!(address.phone, "");
    }

    #[test]
    fn test_validate_address_reports_every_missing_field() {
        let input = AddressInput {
            city: Some("  ".to_string()),
            country: Some("POL".to_string()),
            ..Default::default()
        };
        let errors = validate_address(&input).unwrap_err();
        let fields: Vec<_> = errors.iter().filter_map(|e| e.field.as_deref()).collect();
        assert_eq!(fields, vec!["streetAddress1", "city", "postalCode", "country"]);
        assert_eq!(errors[3].code, Code::Invalid);
    }

    #[test]
    fn test_normalize_language_code() {
        assert_eq!(normalize_language_code("PL").as_deref(), Some("pl"));
        assert_eq!(normalize_language_code("EN_US").as_deref(), Some("en-US"));
        assert_eq!(normalize_language_code("en-gb").as_deref(), Some("en-GB"));
        assert_eq!(normalize_language_code("english"), None);
        assert_eq!(normalize_language_code("eng"), None);
        assert_eq!(normalize_language_code("eng_US"), None);
        assert_eq!(normalize_language_code("en-u"), None);
        assert_eq!(normalize_language_code("en-US-x"), None);
        assert_eq!(normalize_language_code(""), None);
    }

    #[test]
    fn test_validate_taxed_money() {
        let mut errors = Vec::new();
        let input = TaxedMoneyInput {
            net: Decimal::new(130, 0),
            gross: Decimal::new(120, 0),
            currency: "USD".to_string(),
        };
        validate_taxed_money(&input, Some("PLN"), "totalPrice", &mut errors);

        let codes: Vec<_> = errors.iter().map(|e| e.code).collect();
        assert_eq!(codes, vec![Code::IncorrectCurrency, Code::PriceError]);
        assert_eq!(errors[0].field.as_deref(), Some("totalPrice.currency"));
    }
}
