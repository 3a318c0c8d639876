/*!

This is the long-form manual for `election_map` and `geovotes`.

## Input formats

Vote rows can be read from the following formats:
* `csv` Comma Separated Values with a header row
* `json` an array of row objects
* `xlsx` an Excel workbook, with a header row in the first (or a named) worksheet

Every format uses the same column names. The names of the consolidated table
and the names of the raw files published by the electoral court are both
accepted:

| meaning   | consolidated  | raw file     |
|-----------|---------------|--------------|
| state     | `ESTADO`      | `SG_UF`      |
| round     | `TURNO`       | `NR_TURNO`   |
| candidate | `CANDIDATO`   | `NM_VOTAVEL` |
| votes     | `TOTAL_VOTOS` | `QT_VOTOS`, `VOTOS` |

Raw files usually hold one line per polling section. Rows are grouped by
state, round and candidate and their votes are summed before the aggregation
runs. The null and blank pseudo-candidates (`VOTO NULO`, `VOTO BRANCO`) are
dropped at that point.

### `csv`

```text
ESTADO,TURNO,CANDIDATO,TOTAL_VOTOS
SP,1,LULA,100
SP,1,BOLSONARO,80
```

When the files are split by state, the state column may be omitted and the
`state` option of the file source used instead. The raw files of the electoral
court are separated by `;`: set `csvDelimiter` in the file source, or pass
`--csv-delimiter ';'` with a single `--input` file.

### `json`

```text
[{"ESTADO": "SP", "TURNO": 1, "CANDIDATO": "LULA", "TOTAL_VOTOS": 100}]
```

Numbers may also be written as strings.

## Malformed rows

A row is rejected if its state is not a two-letter code, its round is not 1
or 2, its candidate is blank or its vote count is not a non-negative integer.
Rejected rows are reported with their file and line and skipped. With
`--strict`, the first rejected row stops the program.

## Regions

States are grouped in the five regions Norte, Nordeste, Centro-Oeste,
Sudeste and Sul. A well-formed state code outside of the 27 federative units
is kept in the state index, with a warning, but does not contribute to any
region.

## Configuration

The program accepts a configuration file in JSON:

```text
{
  "outputSettings": { "title": "Presidente 2022", "outputDirectory": "out" },
  "voteFileSources": [
    { "provider": "csv", "filePath": "SG_UF=SP/votos.csv", "state": "SP" },
    { "provider": "xlsx", "filePath": "rj.xlsx", "state": "RJ", "excelWorksheetName": "votos" }
  ],
  "excludedCandidates": ["VOTO NULO", "VOTO BRANCO"],
  "referenceCandidates": [
    { "label": "Lula", "marker": "LULA" },
    { "label": "Bolsonaro", "marker": "BOLSONARO" }
  ],
  "boundariesPath": "br_states.json"
}
```

Paths are relative to the directory of the configuration file. A file that
cannot be read is reported and skipped; the program only fails if no file
could be read at all.

## Outputs

The summary lists, for every state and round, the leading candidate and its
color, the total of votes, and for every region and round the candidate
totals. The detail views of the states passed with `--select` are appended.
A state without data gets a `null` entry.

If a boundary document (GeoJSON, states identified by their `SIGLA`
property) is provided, a copy of it is written with the fill color and the
leader of each round added to the properties of every state.

 */
