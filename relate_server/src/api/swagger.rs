use model_error_response::{EmptyResponse, ErrorResponse};
use model_metadata::{
    FieldMetadata, FieldMetadataOption, FieldMetadataSettings, FieldMetadataType, NumberDataType,
    ObjectMetadata, RelationType,
};
use record_filter::{
    FilterableFieldType, LogicalOperator, RecordFilter, RecordFilterGroup, RecordFilterOperand,
};
use utoipa::OpenApi;

use crate::api::login::{SignInUpAction, SocialSsoState};
use crate::api::oauth::google_callback::SocialSsoUser;
use crate::api::views::create_filter_rule_group::FilterRuleGroupResponse;
use crate::api::{health, login, oauth, open_api, views};
use crate::store::View;

#[derive(OpenApi)]
#[openapi(
        paths(
                /// /health
                health::health_handler,

                /// /login
                login::google::handler,

                /// /oauth
                oauth::google_callback::handler,

                /// /open-api
                open_api::core_handler,
                open_api::metadata_handler,

                /// /filter-rule-groups
                views::create_filter_rule::handler,
                views::create_filter_rule_group::handler,
        ),
        components(
            schemas(
                        ErrorResponse,
                        EmptyResponse,

                        // login
                        SignInUpAction,
                        SocialSsoState,
                        SocialSsoUser,

                        // metadata
                        ObjectMetadata,
                        FieldMetadata,
                        FieldMetadataType,
                        FieldMetadataOption,
                        FieldMetadataSettings,
                        NumberDataType,
                        RelationType,

                        // filters
                        LogicalOperator,
                        FilterableFieldType,
                        RecordFilterOperand,
                        RecordFilter,
                        RecordFilterGroup,
                        FilterRuleGroupResponse,
                        View,
                ),
        ),
        tags(
            (name = "relate server", description = "Relate Record Service")
        )
    )]
pub struct ApiDoc;
