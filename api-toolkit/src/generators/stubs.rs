//! Built-in stub templates
//!
//! Rendered with `MiniJinja` (`trim_blocks` and `lstrip_blocks` on, no
//! auto-escaping). Each stub can be replaced by a `<name>.stub` file in the
//! configured stubs directory.

/// Eloquent model
pub const MODEL: &str = r#"<?php

namespace {{ target.namespace }};

use Illuminate\Database\Eloquent\Factories\HasFactory;
use Illuminate\Database\Eloquent\Model;
{% if relations %}
use Illuminate\Database\Eloquent\Relations\BelongsTo;
{% endif %}
{% if soft_delete %}
use Illuminate\Database\Eloquent\SoftDeletes;
{% endif %}
{% if has_filter %}
use Essa\APIToolKit\Filters\Filterable;
use {{ classes.filter.fqcn }};
{% endif %}

class {{ model }} extends Model
{
    use HasFactory{% if soft_delete %}, SoftDeletes{% endif %}{% if has_filter %}, Filterable{% endif %};

{% if has_filter %}
    protected string $default_filters = {{ classes.filter.class }}::class;

{% endif %}
    protected $fillable = [
{% for field in fields %}
        '{{ field.name }}',
{% endfor %}
    ];
{% if casts %}

    protected $casts = [
{% for field in casts %}
        '{{ field.name }}' => '{{ field.cast }}',
{% endfor %}
    ];
{% endif %}
{% for relation in relations %}

    public function {{ relation.method }}(): BelongsTo
    {
        return $this->belongsTo(\{{ relation.model_fqcn }}::class);
    }
{% endfor %}
}
"#;

/// Create-table migration
pub const MIGRATION: &str = r#"<?php

use Illuminate\Database\Migrations\Migration;
use Illuminate\Database\Schema\Blueprint;
use Illuminate\Support\Facades\Schema;

return new class extends Migration
{
    public function up(): void
    {
        Schema::create('{{ table }}', function (Blueprint $table) {
            $table->id();
            {% for field in fields %}
            {{ field.migration }};
            {% endfor %}
            $table->timestamps();
            {% if soft_delete %}
            $table->softDeletes();
            {% endif %}
        });
    }

    public function down(): void
    {
        Schema::dropIfExists('{{ table }}');
    }
};
"#;

/// Model factory
pub const FACTORY: &str = r#"<?php

namespace {{ target.namespace }};

use {{ classes.model.fqcn }};
use Illuminate\Database\Eloquent\Factories\Factory;

/**
 * @extends Factory<{{ model }}>
 */
class {{ target.class }} extends Factory
{
    protected $model = {{ model }}::class;

    public function definition(): array
    {
        return [
            {% for field in fields %}
            '{{ field.name }}' => {{ field.faker }},
            {% endfor %}
        ];
    }
}
"#;

/// Database seeder
pub const SEEDER: &str = r#"<?php

namespace {{ target.namespace }};

use {{ classes.model.fqcn }};
use Illuminate\Database\Seeder;

class {{ target.class }} extends Seeder
{
    public function run(): void
    {
        {{ model }}::factory()->count(10)->create();
    }
}
"#;

/// Query filter
pub const FILTER: &str = r#"<?php

namespace {{ target.namespace }};

use Essa\APIToolKit\Filters\QueryFilters;

class {{ target.class }} extends QueryFilters
{
    protected array $allowedFilters = {{ allowed_filters }};

    protected array $allowedSorts = {{ allowed_sorts }};

    protected array $columnSearch = {{ searchable_columns }};
}
"#;

/// Form request, shared by the create and update kinds
pub const REQUEST: &str = r#"<?php

namespace {{ target.namespace }};

use Illuminate\Foundation\Http\FormRequest;

class {{ target.class }} extends FormRequest
{
    public function authorize(): bool
    {
        return true;
    }

    public function rules(): array
    {
        return [
            {% for field in fields %}
            '{{ field.name }}' => '{{ field[rules_key] }}',
            {% endfor %}
        ];
    }
}
"#;

/// API resource
pub const RESOURCE: &str = r#"<?php

namespace {{ target.namespace }};

use Illuminate\Http\Request;
use Illuminate\Http\Resources\Json\JsonResource;

class {{ target.class }} extends JsonResource
{
    public function toArray(Request $request): array
    {
        return [
            'id' => $this->id,
            {% for field in fields %}
            '{{ field.name }}' => $this->{{ field.name }},
            {% endfor %}
            'created_at' => $this->created_at,
            'updated_at' => $this->updated_at,
        ];
    }
}
"#;

/// API controller
pub const CONTROLLER: &str = r#"<?php

namespace {{ target.namespace }};

use App\Http\Controllers\Controller;
use {{ classes.model.fqcn }};
{% if has_requests %}
use {{ classes.create_request.fqcn }};
use {{ classes.update_request.fqcn }};
{% else %}
use Illuminate\Http\Request;
{% endif %}
{% if has_resource %}
use {{ classes.resource.fqcn }};
use Illuminate\Http\Resources\Json\AnonymousResourceCollection;
{% endif %}
use Illuminate\Http\JsonResponse;

class {{ target.class }} extends Controller
{
{% if has_resource %}
    public function index(): AnonymousResourceCollection
    {
        ${{ plural_variable }} = {{ model }}::{% if has_filter %}useFilters()->{% endif %}paginate();

        return {{ classes.resource.class }}::collection(${{ plural_variable }});
    }
{% else %}
    public function index(): JsonResponse
    {
        return response()->json({{ model }}::{% if has_filter %}useFilters()->{% endif %}paginate());
    }
{% endif %}

    public function store({% if has_requests %}{{ classes.create_request.class }}{% else %}Request{% endif %} $request): JsonResponse
    {
        ${{ variable }} = {{ model }}::create($request->{% if has_requests %}validated{% else %}all{% endif %}());

        return response()->json({% if has_resource %}new {{ classes.resource.class }}(${{ variable }}){% else %}${{ variable }}{% endif %}, 201);
    }

    public function show({{ model }} ${{ variable }}): JsonResponse
    {
        return response()->json({% if has_resource %}new {{ classes.resource.class }}(${{ variable }}){% else %}${{ variable }}{% endif %});
    }

    public function update({% if has_requests %}{{ classes.update_request.class }}{% else %}Request{% endif %} $request, {{ model }} ${{ variable }}): JsonResponse
    {
        ${{ variable }}->update($request->{% if has_requests %}validated{% else %}all{% endif %}());

        return response()->json({% if has_resource %}new {{ classes.resource.class }}(${{ variable }}){% else %}${{ variable }}{% endif %});
    }

    public function destroy({{ model }} ${{ variable }}): JsonResponse
    {
        ${{ variable }}->delete();

        return response()->json(null, 204);
    }
}
"#;

/// Feature test
pub const TEST: &str = r#"<?php

namespace {{ target.namespace }};

use {{ classes.model.fqcn }};
use Illuminate\Foundation\Testing\RefreshDatabase;
use Tests\TestCase;

class {{ target.class }} extends TestCase
{
    use RefreshDatabase;

    protected string $endpoint = '/api/{{ route }}';

    public function test_can_list_{{ table }}(): void
    {
        {{ model }}::factory()->count(3)->create();

        $this->getJson($this->endpoint)->assertOk();
    }

    public function test_can_create_{{ snake }}(): void
    {
        $payload = {{ model }}::factory()->make()->toArray();

        $this->postJson($this->endpoint, $payload)->assertCreated();

        $this->assertDatabaseCount('{{ table }}', 1);
    }

    public function test_can_show_{{ snake }}(): void
    {
        ${{ variable }} = {{ model }}::factory()->create();

        $this->getJson("{$this->endpoint}/{${{ variable }}->id}")->assertOk();
    }

    public function test_can_update_{{ snake }}(): void
    {
        ${{ variable }} = {{ model }}::factory()->create();
        $payload = {{ model }}::factory()->make()->toArray();

        $this->putJson("{$this->endpoint}/{${{ variable }}->id}", $payload)->assertOk();
    }

    public function test_can_delete_{{ snake }}(): void
    {
        ${{ variable }} = {{ model }}::factory()->create();

        $this->deleteJson("{$this->endpoint}/{${{ variable }}->id}")->assertNoContent();

{% if soft_delete %}
        $this->assertSoftDeleted(${{ variable }});
{% else %}
        $this->assertModelMissing(${{ variable }});
{% endif %}
    }
}
"#;

/// Route registration line appended to the routes file
pub const ROUTES: &str = r#"Route::apiResource('/{{ route }}', \{{ classes.controller.fqcn }}::class);
"#;

/// Header written when the routes file does not exist yet
pub const ROUTES_HEADER: &str = r#"<?php

use Illuminate\Support\Facades\Route;

"#;

/// Every built-in stub by name
pub const BUILTIN: &[(&str, &str)] = &[
    ("model", MODEL),
    ("migration", MIGRATION),
    ("factory", FACTORY),
    ("seeder", SEEDER),
    ("filter", FILTER),
    ("request", REQUEST),
    ("resource", RESOURCE),
    ("controller", CONTROLLER),
    ("test", TEST),
    ("routes", ROUTES),
];
