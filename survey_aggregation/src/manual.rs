/*!

This is the long-form manual for `survey_aggregation` and `npsdash`.

## Input formats

The following formats are supported by `npsdash`:
* `csv` Comma Separated Values, with a header row
* `xlsx` Excel workbooks, as downloaded from Google Forms or Microsoft Forms

### `csv`

The first row holds the column names. Every following row is one respondent.
Empty rows are skipped. Rows may be shorter than the header: the missing cells
are treated as unanswered questions.

Column names are matched exactly, including trailing spaces and line breaks.
Google Forms keeps the text of the question as the column name, so a question
typed as `"Nome"` followed by a line break becomes the column `"Nome\n"`.

### `xlsx`

The first worksheet is used, unless `excelWorksheetName` is set. The first row
holds the column names. Whole numbers are read without decimals, so a
satisfaction level stored as the number `4` is read as `"4"`.

## Columns

The engine knows eight fields. By default they are mapped to the questions of
the internal NPS form:

| field                  | default column                                                                                          |
|------------------------|---------------------------------------------------------------------------------------------------------|
| `identity`             | `Nome\n`                                                                                                |
| `satisfaction`         | `Quão satisfeito você está na função que exerce hoje? `                                                 |
| `interestInChange`     | `Você tem interesse em mudar de setor? `                                                                |
| `preferredSectors`     | `Se tem interesse em mudar de Setor. Para qual setor você gostaria de ir?`                              |
| `reason`               | `Qual o principal motivo da sua satisfação ou insatisfação com a função atual? `                        |
| `learnings`            | `O que você mais aprendeu ao desempenhar essa função? Sente que ainda há algo a mais para aprender? `    |
| `specificRoleInterest` | `Alguma função específica que gostaria de realizar nessa mudança de setor ou até mesmo dentro do seu próprio setor?` |
| `tenure`               | `Há quanto tempo você está na função atual? `                                                           |

The `identity` and `satisfaction` columns are required. Any other missing
column only produces a warning.

## Filters

Two filters are available: the employee (the `identity` field) and the
satisfaction level. The value `all` disables a filter. Any other value must be
equal to the raw cell, byte for byte.

## Outputs

* the satisfaction distribution: one entry per level that was answered
* the interest in changing sector: one entry per answer
* the preferred sectors: a record counts once for each sector it lists.
  Sectors are separated by a comma followed by a space (`", "`). A comma
  without a space does not separate sectors.
* the list of employees, always computed on the full table
* the filtered answers, for the detailed feedback list

Categories are listed in the order in which they first appear in the input.

## Known limitations

Sector names cannot contain `", "`: there is no escaping in the export format,
so such a name is counted as two sectors.

An answer made only of separators, such as `", "`, lists no sector. It is an
answered question but adds nothing to the preferred sectors, so the total of
that view can be lower than the number of answers.

Respondents without a name are not offered in the employee list. They can only
be selected by setting the employee filter to the empty string in the
configuration file or on the command line.

*/
